use super::KvStore;
use crate::error::{ReadlogError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, Value>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail, for exercising error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl KvStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        if self.simulate_write_error {
            return Err(ReadlogError::Store("Simulated write error".to_string()));
        }
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Book, BookId, Status};
    use crate::state::ReadingState;
    use crate::store::{AUTHORS_KEY, BOOKS_KEY, TALLY_KEY, YEARS_KEY};
    use crate::tally::Tally;

    /// Builds a store whose four blobs are mutually consistent, as if they had
    /// been written by a previous session.
    pub struct StoreFixture {
        pub store: InMemoryStore,
        books: Vec<Book>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                books: Vec::new(),
            }
        }

        fn next_id(&self) -> BookId {
            self.books.iter().map(|b| b.id).max().unwrap_or(0) + 1
        }

        pub fn with_book(mut self, title: &str, author: &str, status: Status, month: u8, year: i32) -> Self {
            let book = Book {
                id: self.next_id(),
                title: title.to_string(),
                author: author.to_string(),
                status,
                month,
                year,
            };
            self.books.push(book);
            self
        }

        pub fn with_completed(self, title: &str, author: &str, month: u8, year: i32) -> Self {
            self.with_book(title, author, Status::Completed, month, year)
        }

        pub fn with_to_read(self, title: &str, author: &str) -> Self {
            self.with_book(title, author, Status::ToRead, 0, 2024)
        }

        /// Writes the books and the collections derived from them.
        pub fn build(mut self) -> InMemoryStore {
            let mut state = ReadingState::from_parts(
                self.books.clone(),
                Default::default(),
                Default::default(),
                Tally::new(),
            );
            state.reconcile();
            let years: Vec<i32> = self.books.iter().map(|b| b.year).collect();

            self.store.save_as(BOOKS_KEY, state.books()).unwrap();
            self.store.save_as(TALLY_KEY, state.tally()).unwrap();
            let mut all_years = state.years().clone();
            all_years.extend(years);
            self.store.save_as(YEARS_KEY, &all_years).unwrap();
            self.store.save_as(AUTHORS_KEY, state.authors()).unwrap();
            self.store
        }
    }
}
