use super::command::CommandRunner;
use crate::error::{Result, StandupError};
use std::ffi::OsString;
use tracing::debug;

/// Returns `explicit` if it holds a non-blank author, otherwise the
/// `user.name` configured for git.
pub fn resolve_author(runner: &dyn CommandRunner, explicit: Option<&str>) -> Result<String> {
    if let Some(author) = explicit.filter(|a| !a.trim().is_empty()) {
        return Ok(author.to_string());
    }

    let args: Vec<OsString> = ["config", "user.name"].iter().map(OsString::from).collect();
    let output = match runner.run(&args) {
        Ok(output) => output,
        Err(err) => {
            debug!(error = %err, "git config user.name could not be run");
            return Err(StandupError::IdentityUnavailable);
        }
    };

    if !output.is_success() {
        debug!(code = ?output.code, "git config user.name exited unsuccessfully");
        return Err(StandupError::IdentityUnavailable);
    }

    let name = output.stdout.trim();
    if name.is_empty() {
        return Err(StandupError::IdentityUnavailable);
    }
    Ok(name.to_string())
}
