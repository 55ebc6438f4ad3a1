use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::state::ReadingState;

pub fn run(state: &mut ReadingState) -> Result<CmdResult> {
    let (report, touched) = state.reconcile();
    let mut result = CmdResult::default().with_touched(touched);

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        if report.fixed_buckets > 0 {
            result.add_message(CmdMessage::warning(format!(
                "Rebuilt tally: {} bucket(s) corrected",
                report.fixed_buckets
            )));
        }
        if report.restored_years > 0 {
            result.add_message(CmdMessage::warning(format!(
                "Restored {} missing year(s)",
                report.restored_years
            )));
        }
        if report.restored_authors > 0 {
            result.add_message(CmdMessage::warning(format!(
                "Restored {} missing author(s)",
                report.restored_authors
            )));
        }
    }
    Ok(result.with_report(report))
}
