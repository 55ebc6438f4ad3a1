use super::KvStore;
use crate::error::{ReadlogError, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// File-backed store: each key lives in `<root>/<key>.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ReadlogError::Io)?;
        }
        Ok(())
    }
}

impl KvStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(ReadlogError::Io)?;
        let value = serde_json::from_str(&content).map_err(ReadlogError::Serialization)?;
        Ok(Some(value))
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(value).map_err(ReadlogError::Serialization)?;

        // Write to a temp file first so a crash never leaves half a file behind
        let tmp_file = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(ReadlogError::Io)?;
        fs::rename(&tmp_file, self.path_for(key)).map_err(ReadlogError::Io)?;
        Ok(())
    }
}
