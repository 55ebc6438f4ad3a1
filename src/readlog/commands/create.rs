use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NewBook;
use crate::state::ReadingState;

pub fn run(state: &mut ReadingState, new: NewBook) -> Result<CmdResult> {
    let change = state.create_book(new)?;

    let mut result = CmdResult::default().with_touched(change.touched);
    result.add_message(CmdMessage::success(format!(
        "Book added ({}) to {}: {}",
        change.book.id,
        change.book.status.heading(),
        describe(&change.book)
    )));
    Ok(result.with_affected_book(change.book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadlogError;
    use crate::model::Status;

    #[test]
    fn creates_completed_book_and_touches_everything() {
        let mut state = ReadingState::new();
        let result = run(
            &mut state,
            NewBook::new("Dune", "Herbert", Status::Completed, 5, 2024),
        )
        .unwrap();

        assert_eq!(result.affected_books.len(), 1);
        assert!(result.touched.books && result.touched.tally);
        assert!(result.touched.years && result.touched.authors);
        assert!(result.messages[0].content.contains("Dune by Herbert (June 2024)"));
    }

    #[test]
    fn creates_to_read_book_without_tally() {
        let mut state = ReadingState::new();
        let result = run(
            &mut state,
            NewBook::new("Emma", "Austen", Status::ToRead, 1, 2025),
        )
        .unwrap();

        assert!(!result.touched.tally);
        assert!(!result.touched.authors);
        assert!(result.touched.years);
        assert!(state.tally().is_empty());
    }

    #[test]
    fn rejects_missing_author() {
        let mut state = ReadingState::new();
        let err = run(&mut state, NewBook::new("Emma", "", Status::ToRead, 1, 2025)).unwrap_err();
        assert!(matches!(err, ReadlogError::Validation { field: "author", .. }));
        assert!(state.books().is_empty());
    }
}
