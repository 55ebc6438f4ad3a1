use crate::commands::{not_found, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookId;
use crate::state::ReadingState;

pub fn run(state: &mut ReadingState, id: BookId, title: &str) -> Result<CmdResult> {
    let Some(change) = state.edit_title(id, title)? else {
        return Ok(not_found(id));
    };

    let mut result = CmdResult::default().with_touched(change.touched);
    result.add_message(CmdMessage::success(format!(
        "Book renamed ({}): {}",
        id, change.book.title
    )));
    Ok(result.with_affected_book(change.book))
}
