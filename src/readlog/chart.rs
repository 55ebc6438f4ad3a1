//! Bar-chart data for a year of reading.
//!
//! [`ChartData`] is renderer-agnostic: twelve month labels and twelve counts.
//! Without an author filter the counts come straight from the tally; with one
//! they are counted from the completed books of that author.

use crate::model::month_names;
use crate::state::ReadingState;
use serde::Serialize;

pub const SERIES_LABEL: &str = "Books Read Count";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub label: String,
    pub labels: Vec<String>,
    pub series: Vec<u32>,
}

impl ChartData {
    pub fn for_year(state: &ReadingState, year: i32, author: Option<&str>) -> Self {
        let labels: Vec<String> = month_names().into_iter().map(String::from).collect();
        let series = match author {
            None => (0..12u8).map(|m| state.tally().count(year, m)).collect(),
            Some(author) => {
                let mut counts = vec![0u32; 12];
                for book in state.completed_in(year, Some(author)) {
                    if let Some(slot) = counts.get_mut(book.month as usize) {
                        *slot += 1;
                    }
                }
                counts
            }
        };
        Self {
            label: SERIES_LABEL.to_string(),
            labels,
            series,
        }
    }

    pub fn total(&self) -> u32 {
        self.series.iter().sum()
    }

    pub fn max(&self) -> u32 {
        self.series.iter().copied().max().unwrap_or(0)
    }
}
