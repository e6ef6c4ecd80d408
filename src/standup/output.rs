use crate::model::{RepoOutput, StandupOutput, StandupQuery, StandupReport, SCHEMA_VERSION};
use crate::util::repo_header;
use chrono::Utc;
use console::style;
use std::io::{self, Write};

pub const NO_REPOSITORIES: &str = "No git repositories found.";

pub fn no_commits_message(query: &StandupQuery, scanned: usize) -> String {
    format!(
        "No commits found for author '{}' in the last {} days across {} repositories.",
        query.author(),
        query.days(),
        scanned
    )
}

/// Message shown instead of a report when nothing matched, or `None` if
/// there is something to report.
pub fn empty_message(report: &StandupReport, query: &StandupQuery) -> Option<String> {
    if report.scanned() == 0 {
        Some(NO_REPOSITORIES.to_string())
    } else if report.is_empty() {
        Some(no_commits_message(query, report.scanned()))
    } else {
        None
    }
}

pub fn write_text<W: Write>(
    out: &mut W,
    report: &StandupReport,
    query: &StandupQuery,
    colored: bool,
) -> io::Result<()> {
    if let Some(message) = empty_message(report, query) {
        return writeln!(out, "{message}");
    }

    for activity in report.entries() {
        let header = repo_header(query.root(), activity.repository.path());
        writeln!(out, "{}", style(format!("# {header}")).blue().bold().force_styling(colored))?;
        for commit in &activity.commits {
            writeln!(out, "{}", commit.as_str())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn repo_outputs(report: &StandupReport, query: &StandupQuery) -> Vec<RepoOutput> {
    report
        .entries()
        .iter()
        .map(|activity| RepoOutput {
            path: activity.repository.path().to_string_lossy().into_owned(),
            name: repo_header(query.root(), activity.repository.path()),
            commits: activity.commits.clone(),
        })
        .collect()
}

pub fn to_output(report: &StandupReport, query: &StandupQuery) -> StandupOutput {
    StandupOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        root: query.root().to_string_lossy().into_owned(),
        author: query.author().to_string(),
        days: query.days(),
        repositories_scanned: report.scanned(),
        repositories: repo_outputs(report, query),
    }
}

pub fn write_json<W: Write>(out: &mut W, report: &StandupReport, query: &StandupQuery) -> crate::error::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &to_output(report, query))?;
    writeln!(out)?;
    Ok(())
}

pub fn write_ndjson<W: Write>(out: &mut W, report: &StandupReport, query: &StandupQuery) -> crate::error::Result<()> {
    for repo in repo_outputs(report, query) {
        writeln!(out, "{}", serde_json::to_string(&repo)?)?;
    }
    Ok(())
}
