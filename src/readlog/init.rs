use crate::api::ReadlogApi;
use crate::error::{ReadlogError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "READLOG_HOME";

/// Resolves the data directory: `$READLOG_HOME` if set and non-empty,
/// otherwise the platform data dir (e.g. `~/.local/share/readlog`).
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "readlog", "readlog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ReadlogError::Store("Could not determine a data directory".to_string()))
}

/// Opens the file store in `data_dir` and loads settings and reading state
/// from it.
pub fn initialize(data_dir: PathBuf) -> ReadlogApi<FileStore> {
    ReadlogApi::open(FileStore::new(data_dir))
}
