use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Book, Status};
use crate::state::ReadingState;

/// One status column, cut to the requested number of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookColumn {
    pub status: Status,
    pub books: Vec<Book>,
    pub total: usize,
}

impl BookColumn {
    pub fn hidden(&self) -> usize {
        self.total - self.books.len()
    }
}

/// Lists the status columns, or only `only` if given. Each column shows
/// `(more + 1) * page_size` books, most recent first.
pub fn run(
    state: &ReadingState,
    only: Option<Status>,
    more: usize,
    page_size: usize,
) -> Result<CmdResult> {
    let limit = more.saturating_add(1).saturating_mul(page_size.max(1));
    let columns = Status::ALL
        .into_iter()
        .filter(|status| only.map_or(true, |s| s == *status))
        .map(|status| {
            let all = state.books_by_status(status);
            let total = all.len();
            BookColumn {
                status,
                books: all.into_iter().take(limit).collect(),
                total,
            }
        })
        .collect();

    Ok(CmdResult::default().with_columns(columns))
}
