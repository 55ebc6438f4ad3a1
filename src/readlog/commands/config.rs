use crate::commands::{CmdMessage, CmdResult};
use crate::config::{ConfigKey, ReadlogConfig};
use crate::error::Result;
use crate::store::KvStore;

/// What `config` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Every setting, or only the named one.
    Show(Option<String>),
    Set { key: String, value: String },
}

/// Shows or changes settings. A change is saved before it replaces `config`,
/// so the running settings only move once the new ones are stored.
pub fn run<S: KvStore>(
    store: &mut S,
    config: &mut ReadlogConfig,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match action {
        ConfigAction::Show(None) => return Ok(result.with_config(config.clone())),
        ConfigAction::Show(Some(name)) => match name.parse::<ConfigKey>() {
            Ok(key) => result.add_message(CmdMessage::info(config.get(key))),
            Err(e) => result.add_message(CmdMessage::error(e.to_string())),
        },
        ConfigAction::Set { key, value } => {
            let parsed = key
                .parse::<ConfigKey>()
                .and_then(|key| Ok((key, config.with_value(key, &value)?)));
            let (key, updated) = match parsed {
                Ok(pair) => pair,
                Err(e) => {
                    result.add_message(CmdMessage::error(e.to_string()));
                    return Ok(result);
                }
            };

            updated.save(store)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key,
                updated.get(key)
            )));
            *config = updated.clone();
            result = result.with_config(updated);
        }
    }
    Ok(result)
}
