use super::command::CommandRunner;
use crate::model::{CommitEntry, StandupQuery};
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// One line per commit: short hash, subject, relative committer date.
pub const PRETTY_FORMAT: &str = "%C(yellow)%h%Creset %s %C(dim white)(%cr)%Creset";

/// Builds the `git log` invocation for one repository.
pub fn log_args(repo: &Path, query: &StandupQuery, colored: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-C".into(), repo.as_os_str().to_owned(), "log".into()];
    args.push("--all".into());
    args.push("--no-merges".into());
    args.push(format!("--since={}", query.since()).into());
    args.push(format!("--author={}", query.author()).into());
    let color = if colored { "--color=always" } else { "--color=never" };
    args.push(color.into());
    args.push(format!("--pretty=format:{PRETTY_FORMAT}").into());
    args
}

/// Commits by the query's author in `repo`, most recent first.
///
/// Never fails: anything that goes wrong yields an empty list so one bad
/// repository cannot sink the whole report.
pub fn fetch_commits(
    runner: &dyn CommandRunner,
    repo: &Path,
    query: &StandupQuery,
    colored: bool,
) -> Vec<CommitEntry> {
    match runner.run(&log_args(repo, query, colored)) {
        Ok(output) if output.is_success() => parse_log(&output.stdout),
        Ok(output) => {
            debug!(repo = %repo.display(), code = ?output.code, "git log exited unsuccessfully");
            Vec::new()
        }
        Err(err) => {
            log_run_failure(repo, &err);
            Vec::new()
        }
    }
}

fn log_run_failure(repo: &Path, err: &io::Error) {
    if err.kind() == io::ErrorKind::TimedOut {
        warn!(repo = %repo.display(), "git log timed out: {err}");
    } else {
        warn!(repo = %repo.display(), "git log could not be run: {err}");
    }
}

pub fn parse_log(stdout: &str) -> Vec<CommitEntry> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| CommitEntry(line.to_string()))
        .collect()
}
