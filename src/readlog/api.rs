//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for all readlog operations, regardless of the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the [`ReadingState`] for the lifetime of the client
//! - **Loads** the state from the store once, when opened
//! - **Dispatches** to the appropriate command function
//! - **Persists** the entities a mutation touched, right after it ran
//!
//! ## Persistence Is Best-Effort
//!
//! A failed save never fails the operation and never rolls back the in-memory
//! change. It is logged and attached to the result as a warning message, so
//! the UI can tell the user that their last change may not survive a restart.
//!
//! ## Generic Over KvStore
//!
//! `ReadlogApi<S: KvStore>` runs on `FileStore` in production and
//! `InMemoryStore` in tests.

use crate::commands;
use crate::config::ReadlogConfig;
use crate::error::Result;
use crate::model::{current_month_year, BookId, NewBook, Status};
use crate::state::{ReadingState, Touched};
use crate::store::{
    load_or_default, KvStore, AUTHORS_KEY, BOOKS_KEY, NEXT_ID_KEY, TALLY_KEY, YEARS_KEY,
};
use crate::tally::Tally;
use log::{debug, warn};
use std::collections::BTreeSet;

/// The main API facade for readlog operations.
pub struct ReadlogApi<S: KvStore> {
    store: S,
    state: ReadingState,
    config: ReadlogConfig,
}

impl<S: KvStore> ReadlogApi<S> {
    /// Loads settings and reading state from `store`. Missing or malformed
    /// values start empty, or at their defaults.
    pub fn open(store: S) -> Self {
        let config = ReadlogConfig::load(&store).unwrap_or_else(|e| {
            warn!("config: {}; using defaults", e);
            ReadlogConfig::default()
        });
        let mut state = load_state(&store);
        state.set_author_cleanup(config.author_cleanup);
        debug!(
            "api: loaded {} books, {} years, {} authors",
            state.books().len(),
            state.years().len(),
            state.authors().len()
        );
        Self {
            store,
            state,
            config,
        }
    }

    pub fn state(&self) -> &ReadingState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &ReadlogConfig {
        &self.config
    }

    pub fn create_book(&mut self, new: NewBook) -> Result<CmdResult> {
        let mut result = commands::create::run(&mut self.state, new)?;
        self.persist(&mut result);
        Ok(result)
    }

    pub fn delete_book(&mut self, id: BookId) -> Result<CmdResult> {
        let mut result = commands::delete::run(&mut self.state, id)?;
        self.persist(&mut result);
        Ok(result)
    }

    pub fn change_status(&mut self, id: BookId, status: Status) -> Result<CmdResult> {
        let mut result = commands::status::run(&mut self.state, id, status)?;
        self.persist(&mut result);
        Ok(result)
    }

    pub fn edit_title(&mut self, id: BookId, title: &str) -> Result<CmdResult> {
        let mut result = commands::rename::run(&mut self.state, id, title)?;
        self.persist(&mut result);
        Ok(result)
    }

    pub fn list_books(&self, only: Option<Status>, more: usize) -> Result<CmdResult> {
        commands::list::run(&self.state, only, more, self.config.page_size)
    }

    /// Year view; defaults to the current year.
    pub fn stats(&self, year: Option<i32>, author: Option<&str>) -> Result<CmdResult> {
        let year = year.unwrap_or_else(|| current_month_year().1);
        commands::stats::run(&self.state, year, author)
    }

    pub fn doctor(&mut self) -> Result<CmdResult> {
        let mut result = commands::doctor::run(&mut self.state)?;
        self.persist(&mut result);
        Ok(result)
    }

    /// Shows or changes settings. A changed author-cleanup policy applies to
    /// the next mutation of this session.
    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&mut self.store, &mut self.config, action)?;
        self.state.set_author_cleanup(self.config.author_cleanup);
        Ok(result)
    }

    fn persist(&mut self, result: &mut CmdResult) {
        let Touched {
            books,
            years,
            authors,
            tally,
        } = result.touched;

        let mut failures = Vec::new();
        if books {
            if let Err(e) = self.store.save_as(BOOKS_KEY, self.state.books()) {
                failures.push((BOOKS_KEY, e));
            }
            if let Err(e) = self.store.save_as(NEXT_ID_KEY, &self.state.next_id()) {
                failures.push((NEXT_ID_KEY, e));
            }
        }
        if tally {
            if let Err(e) = self.store.save_as(TALLY_KEY, self.state.tally()) {
                failures.push((TALLY_KEY, e));
            }
        }
        if years {
            if let Err(e) = self.store.save_as(YEARS_KEY, self.state.years()) {
                failures.push((YEARS_KEY, e));
            }
        }
        if authors {
            if let Err(e) = self.store.save_as(AUTHORS_KEY, self.state.authors()) {
                failures.push((AUTHORS_KEY, e));
            }
        }

        for (key, e) in failures {
            warn!("api: failed to save '{}': {}", key, e);
            result.add_message(CmdMessage::warning(format!(
                "Could not save {}; the change is kept for this session only ({})",
                key, e
            )));
        }
    }
}

/// Reads the persisted blobs into a reading state. Tally entries no
/// maintained tally would hold are dropped with a warning.
pub fn load_state<S: KvStore>(store: &S) -> ReadingState {
    let books = load_or_default(store, BOOKS_KEY);
    let years: BTreeSet<i32> = load_or_default(store, YEARS_KEY);
    let authors: BTreeSet<String> = load_or_default(store, AUTHORS_KEY);
    let mut tally: Tally = load_or_default(store, TALLY_KEY);
    let next_id: Option<BookId> = load_or_default(store, NEXT_ID_KEY);

    let dropped = tally.drop_invalid_buckets();
    if dropped > 0 {
        warn!(
            "store: ignored {} invalid '{}' entries; run `readlog doctor` to rebuild it",
            dropped, TALLY_KEY
        );
    }

    let state = ReadingState::from_parts(books, years, authors, tally);
    match next_id {
        Some(next_id) => state.with_next_id(next_id),
        None => state,
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{BookColumn, CmdMessage, CmdResult, MessageLevel, YearStats};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::state::AuthorCleanup;
    use crate::store::CONFIG_KEY;
    use serde_json::json;

    fn api(store: InMemoryStore) -> ReadlogApi<InMemoryStore> {
        ReadlogApi::open(store)
    }

    fn with_config(mut store: InMemoryStore, config: ReadlogConfig) -> InMemoryStore {
        config.save(&mut store).unwrap();
        store
    }

    #[test]
    fn create_completed_saves_every_blob() {
        let mut api = api(InMemoryStore::new());
        api.create_book(NewBook::new("Dune", "Herbert", Status::Completed, 5, 2024))
            .unwrap();

        let store = api.store();
        assert_eq!(
            store.keys(),
            vec!["authors", "books", "dateCount", "nextId", "years"]
        );
        assert_eq!(
            store.load(TALLY_KEY).unwrap(),
            Some(json!({"2024": {"5": {"month": "June", "count": 1}}}))
        );
        assert_eq!(store.load(YEARS_KEY).unwrap(), Some(json!([2024])));
        assert_eq!(store.load(AUTHORS_KEY).unwrap(), Some(json!(["Herbert"])));
    }

    #[test]
    fn create_to_read_saves_only_books_and_years() {
        let mut api = api(InMemoryStore::new());
        api.create_book(NewBook::new("Emma", "Austen", Status::ToRead, 0, 2025))
            .unwrap();
        assert_eq!(api.store().keys(), vec!["books", "nextId", "years"]);
    }

    #[test]
    fn reopening_restores_state() {
        let store = StoreFixture::new()
            .with_completed("Dune", "Herbert", 5, 2024)
            .with_to_read("Emma", "Austen")
            .build();
        let mut api = api(store);

        assert_eq!(api.state().books().len(), 2);
        assert_eq!(api.state().tally().count(2024, 5), 1);
        assert!(api.state().authors().contains("Herbert"));

        let result = api
            .create_book(NewBook::new("Ubik", "Dick", Status::Reading, 1, 2024))
            .unwrap();
        assert_eq!(result.affected_books[0].id, 3);
    }

    #[test]
    fn save_failure_keeps_in_memory_change() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        let mut api = api(store);

        let result = api
            .create_book(NewBook::new("Dune", "Herbert", Status::Completed, 5, 2024))
            .unwrap();
        let warnings = result
            .messages
            .iter()
            .filter(|m| m.level == MessageLevel::Warning)
            .count();
        assert_eq!(warnings, 5);
        assert_eq!(api.state().books().len(), 1);
        assert_eq!(api.state().tally().count(2024, 5), 1);
    }

    #[test]
    fn malformed_blob_loads_empty() {
        let mut store = InMemoryStore::new();
        store.save(BOOKS_KEY, &json!("definitely not books")).unwrap();
        store.save(YEARS_KEY, &json!([2020])).unwrap();
        let api = api(store);

        assert!(api.state().books().is_empty());
        assert!(api.state().years().contains(&2020));
    }

    #[test]
    fn delete_unknown_saves_nothing() {
        let mut api = api(InMemoryStore::new());
        let result = api.delete_book(7).unwrap();
        assert!(result.affected_books.is_empty());
        assert!(api.store().keys().is_empty());
    }

    #[test]
    fn status_round_trip_persists_pruned_tally() {
        let store = StoreFixture::new()
            .with_completed("Dune", "Herbert", 5, 2024)
            .build();
        let mut api = api(store);

        api.change_status(1, Status::Reading).unwrap();
        assert_eq!(api.store().load(TALLY_KEY).unwrap(), Some(json!({})));
        assert_eq!(api.store().load(YEARS_KEY).unwrap(), Some(json!([])));
        assert_eq!(api.store().load(AUTHORS_KEY).unwrap(), Some(json!(["Herbert"])));
    }

    #[test]
    fn author_cleanup_config_is_applied() {
        let store = StoreFixture::new()
            .with_completed("Dune", "Herbert", 5, 2024)
            .build();
        let config = ReadlogConfig {
            author_cleanup: AuthorCleanup::Always,
            ..ReadlogConfig::default()
        };
        let mut api = api(with_config(store, config));

        api.change_status(1, Status::Reading).unwrap();
        assert!(api.state().authors().is_empty());
        assert_eq!(api.store().load(AUTHORS_KEY).unwrap(), Some(json!([])));
    }

    #[test]
    fn list_uses_configured_page_size() {
        let mut fixture = StoreFixture::new();
        for i in 0..4 {
            fixture = fixture.with_to_read(&format!("Book {}", i), "Author");
        }
        let config = ReadlogConfig {
            page_size: 3,
            ..ReadlogConfig::default()
        };
        let api = api(with_config(fixture.build(), config));

        let result = api.list_books(Some(Status::ToRead), 0).unwrap();
        assert_eq!(result.columns[0].books.len(), 3);
        assert_eq!(result.columns[0].hidden(), 1);
    }

    #[test]
    fn deleted_id_is_not_reused_after_reopen() {
        let mut api = api(InMemoryStore::new());
        api.create_book(NewBook::new("Dune", "Herbert", Status::ToRead, 0, 2024))
            .unwrap();
        api.create_book(NewBook::new("Emma", "Austen", Status::ToRead, 0, 2024))
            .unwrap();
        api.delete_book(2).unwrap();
        assert_eq!(api.store().load(NEXT_ID_KEY).unwrap(), Some(json!(3)));

        let mut reopened = ReadlogApi::open(api.store);
        let result = reopened
            .create_book(NewBook::new("Ubik", "Dick", Status::ToRead, 0, 2024))
            .unwrap();
        assert_eq!(result.affected_books[0].id, 3);

        let again = reopened.delete_book(2).unwrap();
        assert!(again.affected_books.is_empty());
        assert_eq!(reopened.state().books().len(), 2);
    }

    #[test]
    fn invalid_tally_entries_are_dropped_on_load() {
        let mut store = StoreFixture::new()
            .with_completed("Dune", "Herbert", 5, 2024)
            .build();
        store
            .save(
                TALLY_KEY,
                &json!({
                    "2023": { "2": { "month": "March", "count": 0 } },
                    "2024": {
                        "5": { "month": "June", "count": 1 },
                        "14": { "month": "Smarch", "count": 3 }
                    }
                }),
            )
            .unwrap();
        let api = api(store);

        let tally = api.state().tally();
        assert_eq!(tally.years().collect::<Vec<_>>(), vec![2024]);
        assert_eq!(tally.bucket_count(), 1);
        assert_eq!(tally, &Tally::from_books(api.state().books()));
    }

    #[test]
    fn config_change_applies_to_running_state() {
        let store = StoreFixture::new()
            .with_completed("Dune", "Herbert", 5, 2024)
            .build();
        let mut api = api(store);

        api.config(ConfigAction::Set {
            key: "author-cleanup".into(),
            value: "always".into(),
        })
        .unwrap();
        assert_eq!(api.settings().author_cleanup, AuthorCleanup::Always);
        assert!(api.store().load(CONFIG_KEY).unwrap().is_some());

        api.change_status(1, Status::Reading).unwrap();
        assert!(api.state().authors().is_empty());
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let mut store = InMemoryStore::new();
        store.save(CONFIG_KEY, &json!("loud")).unwrap();
        let api = api(store);
        assert_eq!(api.settings(), &ReadlogConfig::default());
    }
}
