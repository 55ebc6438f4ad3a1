use crate::commands::{describe, not_found, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookId;
use crate::state::ReadingState;

pub fn run(state: &mut ReadingState, id: BookId) -> Result<CmdResult> {
    let Some(change) = state.delete_book(id) else {
        return Ok(not_found(id));
    };

    let mut result = CmdResult::default().with_touched(change.touched);
    result.add_message(CmdMessage::success(format!(
        "Book deleted ({}): {}",
        id,
        describe(&change.book)
    )));
    Ok(result.with_affected_book(change.book))
}
