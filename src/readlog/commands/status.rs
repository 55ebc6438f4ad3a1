use crate::commands::{not_found, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{BookId, Status};
use crate::state::ReadingState;

pub fn run(state: &mut ReadingState, id: BookId, status: Status) -> Result<CmdResult> {
    let previous = match state.book(id) {
        Some(book) => book.status,
        None => return Ok(not_found(id)),
    };
    let Some(change) = state.change_status(id, status) else {
        return Ok(not_found(id));
    };

    let mut result = CmdResult::default().with_touched(change.touched);
    if previous == status {
        result.add_message(CmdMessage::info(format!(
            "{} is already in {}",
            change.book.title,
            status.heading()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Book moved ({}): {} {} -> {}",
            id,
            change.book.title,
            previous.heading(),
            status.heading()
        )));
    }
    Ok(result.with_affected_book(change.book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, MessageLevel};
    use crate::model::NewBook;

    fn seeded() -> ReadingState {
        let mut state = ReadingState::new();
        create::run(
            &mut state,
            NewBook::new("Dune", "Herbert", Status::Reading, 5, 2024),
        )
        .unwrap();
        state
    }

    #[test]
    fn completing_updates_tally() {
        let mut state = seeded();
        let result = run(&mut state, 1, Status::Completed).unwrap();
        assert!(result.touched.tally);
        assert_eq!(state.tally().count(2024, 5), 1);
        assert_eq!(result.affected_books[0].status, Status::Completed);
    }

    #[test]
    fn same_status_reports_info_and_touches_nothing() {
        let mut state = seeded();
        let result = run(&mut state, 1, Status::Reading).unwrap();
        assert!(!result.touched.any());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut state = seeded();
        let result = run(&mut state, 42, Status::Completed).unwrap();
        assert!(result.affected_books.is_empty());
        assert!(state.tally().is_empty());
    }
}
