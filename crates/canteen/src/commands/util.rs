//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use canteen_core::{AppContext, Severity};
use serde::de::DeserializeOwned;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Refuse to call the API without a stored session.
pub fn require_session(ctx: &AppContext) -> Result<(), CliError> {
    if ctx.session().session().access_token().is_none() {
        return Err(CliError::NotSignedIn);
    }
    Ok(())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON body for `--from-file`; `-` reads stdin.
pub fn read_payload<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid payload: {e}"),
    })
}

/// Run a store action and surface the notification it leaves behind.
///
/// Stores report failures through the notifier rather than `Result`, so
/// an error notification becomes the command's error. A session that
/// vanished during the call means the refresh token was rejected.
pub async fn run_action<T>(
    ctx: &AppContext,
    global: &GlobalOpts,
    action: impl Future<Output = T>,
) -> Result<T, CliError> {
    let ui = ctx.ui();
    ui.hide_notification();
    let out = action.await;

    match ui.notification() {
        Some(note) if note.severity == Severity::Error => {
            ui.hide_notification();
            if ctx.session().session().access_token().is_none() {
                return Err(CliError::SessionExpired);
            }
            Err(CliError::ActionFailed {
                message: note.message,
            })
        }
        Some(note) => {
            output::print_notification(&note, output::should_color(&global.color), global.quiet);
            ui.hide_notification();
            Ok(out)
        }
        None => Ok(out),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn payload_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dish.json");
        std::fs::write(&path, r#"{ "name_kz": "Палау" }"#).unwrap();

        let value: Value = read_payload(&path).unwrap();
        assert_eq!(value["name_kz"], "Палау");
    }

    #[test]
    fn broken_payload_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dish.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_payload::<Value>(&path).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
