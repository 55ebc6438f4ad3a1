//! User settings, kept in the same store as the reading data under the
//! `config` key (`config.json` on disk). Missing fields take their defaults.

use crate::error::{ReadlogError, Result};
use crate::state::AuthorCleanup;
use crate::store::{KvStore, CONFIG_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEFAULT_PAGE_SIZE: usize = 5;

/// A setting as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    PageSize,
    AuthorCleanup,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::PageSize, ConfigKey::AuthorCleanup];

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::PageSize => "page-size",
            ConfigKey::AuthorCleanup => "author-cleanup",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ReadlogError;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == s.trim())
            .ok_or_else(|| ReadlogError::Config(format!("Unknown config key: {}", s)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReadlogConfig {
    /// Books shown per status column before `--more` is needed
    pub page_size: usize,

    /// Whether moving a book out of Completed also drops its author
    pub author_cleanup: AuthorCleanup,
}

impl Default for ReadlogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            author_cleanup: AuthorCleanup::default(),
        }
    }
}

impl ReadlogConfig {
    /// Reads the stored settings. A store that has none yields the defaults;
    /// a stored value of the wrong shape is an error.
    pub fn load<S: KvStore>(store: &S) -> Result<Self> {
        match store.load(CONFIG_KEY)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Self::default()),
        }
    }

    pub fn save<S: KvStore>(&self, store: &mut S) -> Result<()> {
        store.save_as(CONFIG_KEY, self)
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::PageSize => self.page_size.to_string(),
            ConfigKey::AuthorCleanup => self.author_cleanup.to_string(),
        }
    }

    /// Every setting with its current value, in display order.
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .collect()
    }

    /// A copy with `key` set to `value`. `self` is left as it was, so an
    /// invalid value changes nothing.
    pub fn with_value(&self, key: ConfigKey, value: &str) -> Result<Self> {
        let mut updated = self.clone();
        match key {
            ConfigKey::PageSize => updated.page_size = parse_page_size(value)?,
            ConfigKey::AuthorCleanup => updated.author_cleanup = value.parse()?,
        }
        Ok(updated)
    }
}

fn parse_page_size(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ReadlogError::Config(
            "page-size must be at least 1".to_string(),
        )),
        Ok(size) => Ok(size),
        Err(_) => Err(ReadlogError::Config(format!(
            "page-size must be a number, got '{}'",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = ReadlogConfig::default();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.author_cleanup, AuthorCleanup::OnDelete);
    }

    #[test]
    fn test_keys_parse_by_cli_name() {
        assert_eq!("page-size".parse::<ConfigKey>().unwrap(), ConfigKey::PageSize);
        assert_eq!(
            "author-cleanup".parse::<ConfigKey>().unwrap(),
            ConfigKey::AuthorCleanup
        );
        assert!("page_size".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_with_value() {
        let config = ReadlogConfig::default();
        let updated = config.with_value(ConfigKey::PageSize, "12").unwrap();
        assert_eq!(updated.page_size, 12);
        assert_eq!(updated.get(ConfigKey::PageSize), "12");

        let updated = config.with_value(ConfigKey::AuthorCleanup, "always").unwrap();
        assert_eq!(updated.author_cleanup, AuthorCleanup::Always);
        assert_eq!(config, ReadlogConfig::default());
    }

    #[test]
    fn test_with_value_rejects_bad_values() {
        let config = ReadlogConfig::default();
        assert!(config.with_value(ConfigKey::PageSize, "zero").is_err());
        assert!(config.with_value(ConfigKey::PageSize, "0").is_err());
        assert!(config.with_value(ConfigKey::AuthorCleanup, "never").is_err());
    }

    #[test]
    fn test_entries_list_every_key() {
        let entries = ReadlogConfig::default().entries();
        assert_eq!(
            entries,
            vec![
                (ConfigKey::PageSize, "5".to_string()),
                (ConfigKey::AuthorCleanup, "on-delete".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_from_empty_store() {
        let store = InMemoryStore::new();
        assert_eq!(ReadlogConfig::load(&store).unwrap(), ReadlogConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = InMemoryStore::new();
        let config = ReadlogConfig::default()
            .with_value(ConfigKey::PageSize, "8")
            .unwrap();
        config.save(&mut store).unwrap();

        assert_eq!(ReadlogConfig::load(&store).unwrap().page_size, 8);
        assert_eq!(store.keys(), vec![CONFIG_KEY]);
    }

    #[test]
    fn test_partial_value_uses_defaults() {
        let mut store = InMemoryStore::new();
        store.save(CONFIG_KEY, &json!({"page_size": 3})).unwrap();

        let loaded = ReadlogConfig::load(&store).unwrap();
        assert_eq!(loaded.page_size, 3);
        assert_eq!(loaded.author_cleanup, AuthorCleanup::OnDelete);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let mut store = InMemoryStore::new();
        store.save(CONFIG_KEY, &json!(["page_size", 3])).unwrap();
        assert!(ReadlogConfig::load(&store).is_err());
    }
}
