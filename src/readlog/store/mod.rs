//! # Storage Layer
//!
//! Reading state is persisted as independent named JSON values. The
//! [`KvStore`] trait is the whole storage contract: load a value by key, save a
//! value by key. Keeping it that small lets the same reading state run against
//! files in production and a map in tests.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<key>.json` file per value in a data directory,
//!   written atomically (temp file, then rename).
//! - [`memory::InMemoryStore`]: a `HashMap`, for tests. Can simulate write
//!   failures.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── books.json       # [ { id, title, author, status, month, year } ]
//! ├── dateCount.json   # { "2024": { "5": { "month": "June", "count": 1 } } }
//! ├── years.json       # [ 2023, 2024 ]
//! ├── authors.json     # [ "Austen", "Herbert" ]
//! ├── nextId.json      # 3, the id the next book gets
//! └── config.json      # see config.rs
//! ```
//!
//! ## Failure Policy
//!
//! Loading is forgiving: a missing or malformed value reads as "no prior
//! state" (see [`load_or_default`]). Saving reports errors to the caller, which
//! decides whether they are fatal. The API layer never lets them roll back an
//! in-memory change.

use crate::error::Result;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub mod fs;
pub mod memory;

pub const BOOKS_KEY: &str = "books";
pub const TALLY_KEY: &str = "dateCount";
pub const YEARS_KEY: &str = "years";
pub const AUTHORS_KEY: &str = "authors";
pub const NEXT_ID_KEY: &str = "nextId";
pub const CONFIG_KEY: &str = "config";

/// Abstract interface for named JSON values.
pub trait KvStore {
    /// Load the value stored under `key`, `None` if nothing was stored.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &Value) -> Result<()>;

    /// Serialize and store a typed value.
    fn save_as<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value)?;
        self.save(key, &value)
    }
}

/// Loads and deserializes `key`, falling back to `T::default()` when the value
/// is absent, unreadable or has the wrong shape.
pub fn load_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KvStore,
    T: DeserializeOwned + Default,
{
    let value = match store.load(key) {
        Ok(Some(value)) => value,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!("store: could not read '{}', starting empty: {}", key, e);
            return T::default();
        }
    };
    match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("store: '{}' is malformed, starting empty: {}", key, e);
            T::default()
        }
    }
}
