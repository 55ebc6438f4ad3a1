use crate::error::{ReadlogError, Result};
use chrono::{Datelike, Local, Month};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type BookId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    ToRead,
    Reading,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::ToRead, Status::Reading, Status::Completed];

    pub fn is_completed(self) -> bool {
        self == Status::Completed
    }

    /// Column heading used by list views.
    pub fn heading(self) -> &'static str {
        match self {
            Status::ToRead => "To Read",
            Status::Reading => "Reading",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Status::ToRead => "to-read",
            Status::Reading => "reading",
            Status::Completed => "completed",
        };
        f.write_str(tag)
    }
}

impl FromStr for Status {
    type Err = ReadlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "to-read" | "toread" | "todo" => Ok(Status::ToRead),
            "reading" => Ok(Status::Reading),
            "completed" | "done" | "read" => Ok(Status::Completed),
            other => Err(ReadlogError::Api(format!(
                "Unknown status '{}' (expected to-read, reading or completed)",
                other
            ))),
        }
    }
}

/// A single book record. Records are replaced, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub status: Status,
    /// Zero-based month index (0 = January).
    pub month: u8,
    pub year: i32,
}

impl Book {
    pub fn with_status(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn with_title(&self, title: String) -> Self {
        Self {
            title,
            ..self.clone()
        }
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("Unknown")
    }
}

/// Input for creating a book; the id is assigned by the reading state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub status: Status,
    pub month: u8,
    pub year: i32,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        status: Status,
        month: u8,
        year: i32,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            status,
            month,
            year,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ReadlogError::validation("title", "Please enter a book title"));
        }
        if self.author.trim().is_empty() {
            return Err(ReadlogError::validation("author", "Please enter an author"));
        }
        if month_name(self.month).is_none() {
            return Err(ReadlogError::validation(
                "month",
                format!("{} is not a month index (0-11)", self.month),
            ));
        }
        Ok(())
    }
}

/// English month name for a zero-based month index.
pub fn month_name(index: u8) -> Option<&'static str> {
    let number = index.checked_add(1)?;
    Month::try_from(number).ok().map(|m| m.name())
}

/// All twelve month names, January first.
pub fn month_names() -> Vec<&'static str> {
    (0..12).filter_map(month_name).collect()
}

/// Parses a user-facing month: `1`-`12`, a full name or a three letter abbreviation.
/// Returns the zero-based index.
pub fn parse_month(input: &str) -> Result<u8> {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
        if (1..=12).contains(&n) {
            return Ok(n - 1);
        }
        return Err(ReadlogError::Api(format!(
            "Month number must be between 1 and 12, got {}",
            n
        )));
    }
    trimmed
        .parse::<Month>()
        .map(|m| (m.number_from_month() - 1) as u8)
        .map_err(|_| ReadlogError::Api(format!("Unknown month '{}'", trimmed)))
}

/// Zero-based month and year of the local clock.
pub fn current_month_year() -> (u8, i32) {
    let now = Local::now();
    (now.month0() as u8, now.year())
}
