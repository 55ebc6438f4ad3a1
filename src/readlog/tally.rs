//! # Completion Tally
//!
//! The tally is a sparse `year -> month index -> {month, count}` summary of
//! completed books. It is a cache derived from the book list: every bucket
//! holds a positive count, and a year disappears as soon as its last bucket
//! is pruned. [`Tally::from_books`] rebuilds it from scratch, which is what the
//! incrementally maintained tally must always equal.
//!
//! Serialized, it is the `dateCount` blob:
//!
//! ```text
//! { "2024": { "5": { "month": "June", "count": 2 } } }
//! ```

use crate::model::{month_name, Book};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub count: u32,
}

/// Buckets for a single year, keyed by zero-based month index.
pub type YearlyDateCount = BTreeMap<u8, MonthBucket>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    years: BTreeMap<i32, YearlyDateCount>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans completed books and counts them per (year, month).
    pub fn from_books<'a, I>(books: I) -> Self
    where
        I: IntoIterator<Item = &'a Book>,
    {
        let mut tally = Tally::new();
        for book in books.into_iter().filter(|b| b.status.is_completed()) {
            tally.record(book.year, book.month);
        }
        tally
    }

    /// Adds one completion to the bucket, creating it at zero first if needed.
    pub fn record(&mut self, year: i32, month: u8) {
        let bucket = self
            .years
            .entry(year)
            .or_default()
            .entry(month)
            .or_insert_with(|| MonthBucket {
                month: month_name(month).unwrap_or("Unknown").to_string(),
                count: 0,
            });
        bucket.count += 1;
    }

    /// Removes one completion from the bucket, then prunes the year.
    ///
    /// Returns `true` when the year lost its last bucket and is gone from the
    /// tally. A missing bucket means the stored tally drifted from the books;
    /// it is logged and left alone.
    pub fn retract(&mut self, year: i32, month: u8) -> bool {
        match self
            .years
            .get_mut(&year)
            .and_then(|months| months.get_mut(&month))
        {
            Some(bucket) => bucket.count = bucket.count.saturating_sub(1),
            None => warn!(
                "tally: no bucket for {}/{} to decrement; run `readlog doctor`",
                year, month
            ),
        }
        self.prune(year)
    }

    /// Drops zero-count buckets of `year`, and the year itself once empty.
    /// Returns `true` if the year is absent from the tally afterwards.
    pub fn prune(&mut self, year: i32) -> bool {
        let Some(months) = self.years.get_mut(&year) else {
            return true;
        };
        months.retain(|_, bucket| bucket.count > 0);
        if months.is_empty() {
            self.years.remove(&year);
            return true;
        }
        false
    }

    /// Drops entries a maintained tally never holds: zero counts, month
    /// indices past December and years without buckets. Returns how many
    /// entries were removed.
    pub fn drop_invalid_buckets(&mut self) -> usize {
        let mut removed = 0;
        self.years.retain(|_, months| {
            let before = months.len();
            months.retain(|month, bucket| bucket.count > 0 && month_name(*month).is_some());
            removed += before - months.len();
            if months.is_empty() {
                removed += usize::from(before == 0);
                return false;
            }
            true
        });
        removed
    }

    /// Buckets for `year`, empty when nothing was completed that year.
    pub fn for_year(&self, year: i32) -> YearlyDateCount {
        self.years.get(&year).cloned().unwrap_or_default()
    }

    pub fn count(&self, year: i32, month: u8) -> u32 {
        self.years
            .get(&year)
            .and_then(|months| months.get(&month))
            .map_or(0, |bucket| bucket.count)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Total number of buckets across all years.
    pub fn bucket_count(&self) -> usize {
        self.years.values().map(|m| m.len()).sum()
    }

    pub(crate) fn buckets(&self) -> impl Iterator<Item = (i32, u8, &MonthBucket)> + '_ {
        self.years
            .iter()
            .flat_map(|(year, months)| months.iter().map(move |(m, b)| (*year, *m, b)))
    }
}
