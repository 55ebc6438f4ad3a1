use crate::chart::ChartData;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Book;
use crate::state::ReadingState;

/// Everything the graph view needs for one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStats {
    pub year: i32,
    pub author: Option<String>,
    /// Years with data, ascending.
    pub years: Vec<i32>,
    pub authors: Vec<String>,
    /// Completed books of the year (and author), by month.
    pub books: Vec<Book>,
    pub chart: ChartData,
}

pub fn run(state: &ReadingState, year: i32, author: Option<&str>) -> Result<CmdResult> {
    let books = state.completed_in(year, author);
    let stats = YearStats {
        year,
        author: author.map(str::to_string),
        years: state.years().iter().copied().collect(),
        authors: state.authors().iter().cloned().collect(),
        chart: ChartData::for_year(state, year, author),
        books,
    };

    let mut result = CmdResult::default();
    if let Some(author) = author {
        if !state.authors().contains(author) {
            result.add_message(CmdMessage::warning(format!(
                "No completed books by {}",
                author
            )));
        }
    }
    Ok(result.with_stats(stats))
}
