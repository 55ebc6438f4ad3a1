//! # Reading State
//!
//! [`ReadingState`] owns the book list and the three collections derived from
//! it: the completion [`Tally`], the set of `years` with data, and the set of
//! `authors` with a completed book. The derived collections are private and
//! only change through the mutation methods here, so they cannot drift from
//! the books.
//!
//! Every mutation returns a [`Change`] carrying the resulting book and a
//! [`Touched`] mask naming the persisted entities that changed. The API layer
//! saves exactly those.
//!
//! ## Author cleanup
//!
//! Deleting a book rebuilds `authors` from the remaining completed books.
//! Moving a book away from Completed keeps its author by default
//! ([`AuthorCleanup::OnDelete`]); [`AuthorCleanup::Always`] rebuilds there too.

use crate::error::{ReadlogError, Result};
use crate::model::{Book, BookId, NewBook, Status};
use crate::tally::{Tally, YearlyDateCount};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// When the author set is rebuilt from the completed books.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorCleanup {
    /// Only deleting a book drops authors without completed books.
    #[default]
    OnDelete,
    /// Moving a book away from Completed drops them as well.
    Always,
}

impl fmt::Display for AuthorCleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthorCleanup::OnDelete => "on-delete",
            AuthorCleanup::Always => "always",
        })
    }
}

impl FromStr for AuthorCleanup {
    type Err = ReadlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "on-delete" => Ok(AuthorCleanup::OnDelete),
            "always" => Ok(AuthorCleanup::Always),
            other => Err(ReadlogError::Config(format!(
                "author-cleanup must be 'on-delete' or 'always', got '{}'",
                other
            ))),
        }
    }
}

/// Which persisted entities a mutation changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub books: bool,
    pub years: bool,
    pub authors: bool,
    pub tally: bool,
}

impl Touched {
    pub fn any(&self) -> bool {
        self.books || self.years || self.authors || self.tally
    }

    pub fn all() -> Self {
        Self {
            books: true,
            years: true,
            authors: true,
            tally: true,
        }
    }
}

/// The outcome of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub book: Book,
    pub touched: Touched,
}

/// Repairs made by [`ReadingState::reconcile`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub fixed_buckets: usize,
    pub restored_years: usize,
    pub restored_authors: usize,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.fixed_buckets == 0 && self.restored_years == 0 && self.restored_authors == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadingState {
    books: Vec<Book>,
    years: BTreeSet<i32>,
    authors: BTreeSet<String>,
    tally: Tally,
    next_id: BookId,
    author_cleanup: AuthorCleanup,
}

impl ReadingState {
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), BTreeSet::new(), BTreeSet::new(), Tally::new())
    }

    /// Rebuilds a state from previously persisted collections.
    pub fn from_parts(
        books: Vec<Book>,
        years: BTreeSet<i32>,
        authors: BTreeSet<String>,
        tally: Tally,
    ) -> Self {
        let next_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            books,
            years,
            authors,
            tally,
            next_id,
            author_cleanup: AuthorCleanup::default(),
        }
    }

    pub fn with_author_cleanup(mut self, policy: AuthorCleanup) -> Self {
        self.author_cleanup = policy;
        self
    }

    pub fn set_author_cleanup(&mut self, policy: AuthorCleanup) {
        self.author_cleanup = policy;
    }

    pub fn author_cleanup(&self) -> AuthorCleanup {
        self.author_cleanup
    }

    /// Raises the id counter to a persisted value. Ids of deleted books stay
    /// retired across sessions; the counter never goes below `max(id) + 1`.
    pub fn with_next_id(mut self, next_id: BookId) -> Self {
        self.next_id = self.next_id.max(next_id);
        self
    }

    /// The id the next created book will get.
    pub fn next_id(&self) -> BookId {
        self.next_id
    }

    // --- Read accessors ---

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    pub fn authors(&self) -> &BTreeSet<String> {
        &self.authors
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    // --- Mutations ---

    pub fn create_book(&mut self, new: NewBook) -> Result<Change> {
        new.validate()?;

        let book = Book {
            id: self.allocate_id(),
            title: new.title,
            author: new.author,
            status: new.status,
            month: new.month,
            year: new.year,
        };
        self.books.push(book.clone());

        let mut touched = Touched {
            books: true,
            ..Touched::default()
        };
        if book.status.is_completed() {
            self.record_completion(&book);
            touched.tally = true;
            touched.authors = self.authors.insert(book.author.clone());
        }
        touched.years = self.years.insert(book.year);

        debug!("state: created book {} ({})", book.id, book.status);
        Ok(Change { book, touched })
    }

    /// Counts `book` once in the tally at its (year, month).
    pub fn record_completion(&mut self, book: &Book) {
        self.tally.record(book.year, book.month);
    }

    /// Removes a book. Unknown ids are a no-op and return `None`.
    pub fn delete_book(&mut self, id: BookId) -> Option<Change> {
        let position = self.books.iter().position(|b| b.id == id)?;

        let mut touched = Touched {
            books: true,
            ..Touched::default()
        };
        let book = self.books[position].clone();
        if book.status.is_completed() {
            self.tally.retract(book.year, book.month);
            touched.tally = true;
            touched.years = self.prune_empty_buckets(book.year);
        }

        self.books.remove(position);
        touched.authors = self.rebuild_authors();

        debug!("state: deleted book {}", id);
        Some(Change { book, touched })
    }

    /// Moves a book to `new_status`. Unknown ids are a no-op and return `None`.
    pub fn change_status(&mut self, id: BookId, new_status: Status) -> Option<Change> {
        let position = self.books.iter().position(|b| b.id == id)?;
        let old_status = self.books[position].status;
        let book = self.books[position].with_status(new_status);
        self.books[position] = book.clone();

        let mut touched = Touched {
            books: old_status != new_status,
            ..Touched::default()
        };

        match (old_status.is_completed(), new_status.is_completed()) {
            (false, true) => {
                self.record_completion(&book);
                touched.tally = true;
                touched.authors = self.authors.insert(book.author.clone());
            }
            (true, false) => {
                self.tally.retract(book.year, book.month);
                touched.tally = true;
                touched.years = self.prune_empty_buckets(book.year);
                if self.author_cleanup == AuthorCleanup::Always {
                    touched.authors = self.rebuild_authors();
                }
            }
            (true, true) | (false, false) => {}
        }

        debug!("state: book {} moved {} -> {}", id, old_status, new_status);
        Some(Change { book, touched })
    }

    /// Replaces a book's title. Unknown ids are a no-op and return `Ok(None)`.
    pub fn edit_title(&mut self, id: BookId, new_title: &str) -> Result<Option<Change>> {
        if new_title.trim().is_empty() {
            return Err(ReadlogError::validation("title", "Please enter a book title"));
        }
        let Some(position) = self.books.iter().position(|b| b.id == id) else {
            return Ok(None);
        };
        let book = self.books[position].with_title(new_title.to_string());
        self.books[position] = book.clone();

        Ok(Some(Change {
            book,
            touched: Touched {
                books: true,
                ..Touched::default()
            },
        }))
    }

    /// Drops zero-count buckets of `year`; when none remain the year leaves
    /// both the tally and `years`. Returns `true` if `years` changed.
    pub fn prune_empty_buckets(&mut self, year: i32) -> bool {
        if self.tally.prune(year) {
            return self.years.remove(&year);
        }
        false
    }

    // --- Queries ---

    /// Books with `status`, most recent (year, month) first. Ties keep insertion order.
    pub fn books_by_status(&self, status: Status) -> Vec<Book> {
        let mut books: Vec<Book> = self
            .books
            .iter()
            .filter(|b| b.status == status)
            .cloned()
            .collect();
        books.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        books
    }

    pub fn tally_for(&self, year: i32) -> YearlyDateCount {
        self.tally.for_year(year)
    }

    /// Completed books of `year`, optionally by one author, ordered by month.
    pub fn completed_in(&self, year: i32, author: Option<&str>) -> Vec<Book> {
        let mut books: Vec<Book> = self
            .books
            .iter()
            .filter(|b| b.status.is_completed() && b.year == year)
            .filter(|b| author.map_or(true, |a| b.author == a))
            .cloned()
            .collect();
        books.sort_by_key(|b| b.month);
        books
    }

    // --- Reconciliation ---

    /// Recomputes the tally from the books and restores missing years and
    /// authors. Stale authors are left in place.
    pub fn reconcile(&mut self) -> (DoctorReport, Touched) {
        let mut report = DoctorReport::default();
        let mut touched = Touched::default();

        let scanned = Tally::from_books(&self.books);
        if scanned != self.tally {
            report.fixed_buckets = count_bucket_differences(&self.tally, &scanned);
            self.tally = scanned;
            touched.tally = true;
        }

        let tally_years: Vec<i32> = self.tally.years().collect();
        for year in tally_years {
            if self.years.insert(year) {
                report.restored_years += 1;
            }
        }

        let completed_authors: Vec<String> = self
            .books
            .iter()
            .filter(|b| b.status.is_completed())
            .map(|b| b.author.clone())
            .collect();
        for author in completed_authors {
            if self.authors.insert(author) {
                report.restored_authors += 1;
            }
        }

        touched.years = report.restored_years > 0;
        touched.authors = report.restored_authors > 0;
        (report, touched)
    }

    fn rebuild_authors(&mut self) -> bool {
        let rebuilt: BTreeSet<String> = self
            .books
            .iter()
            .filter(|b| b.status.is_completed())
            .map(|b| b.author.clone())
            .collect();
        if rebuilt == self.authors {
            return false;
        }
        self.authors = rebuilt;
        true
    }

    fn allocate_id(&mut self) -> BookId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn count_bucket_differences(current: &Tally, scanned: &Tally) -> usize {
    let stale = current
        .buckets()
        .filter(|(y, m, b)| scanned.count(*y, *m) != b.count)
        .count();
    let missing = scanned
        .buckets()
        .filter(|(y, m, _)| current.count(*y, *m) == 0)
        .count();
    stale + missing
}
