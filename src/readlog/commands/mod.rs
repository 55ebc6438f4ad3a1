use crate::config::ReadlogConfig;
use crate::model::{Book, Status};
use crate::state::{DoctorReport, Touched};

pub mod config;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod list;
pub mod rename;
pub mod stats;
pub mod status;

pub use list::BookColumn;
pub use stats::YearStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub columns: Vec<BookColumn>,
    pub stats: Option<YearStats>,
    pub report: Option<DoctorReport>,
    pub config: Option<ReadlogConfig>,
    pub messages: Vec<CmdMessage>,
    /// Persisted entities changed by the command; the API saves these.
    pub touched: Touched,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_book(mut self, book: Book) -> Self {
        self.affected_books.push(book);
        self
    }

    pub fn with_columns(mut self, columns: Vec<BookColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_stats(mut self, stats: YearStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_report(mut self, report: DoctorReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_config(mut self, config: ReadlogConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_touched(mut self, touched: Touched) -> Self {
        self.touched = touched;
        self
    }
}

pub(crate) fn not_found(id: u64) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("No book with id {}", id)));
    result
}

pub(crate) fn describe(book: &Book) -> String {
    match book.status {
        Status::Completed => format!(
            "{} by {} ({} {})",
            book.title,
            book.author,
            book.month_name(),
            book.year
        ),
        _ => format!("{} by {}", book.title, book.author),
    }
}
