use crate::error::Result;
use crate::git::{fetch_commits, CommandRunner};
use crate::model::{CommitEntry, Repository, StandupQuery, StandupReport};
use indicatif::ProgressBar;
use rayon::prelude::*;

/// How the per-repository fetches are scheduled.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Worker threads; `None` lets rayon decide.
    pub jobs: Option<usize>,
    pub colored: bool,
}

/// Fetches every repository's history on a bounded pool and assembles the
/// report in discovery order.
pub fn build_report(
    runner: &dyn CommandRunner,
    repos: Vec<Repository>,
    query: &StandupQuery,
    options: FetchOptions,
    progress: &ProgressBar,
) -> Result<StandupReport> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = options.jobs.filter(|&j| j > 0) {
        builder = builder.num_threads(jobs);
    }
    let pool = builder.build()?;

    let results: Vec<Vec<CommitEntry>> = pool.install(|| {
        repos
            .par_iter()
            .map(|repo| {
                let commits = fetch_commits(runner, repo.path(), query, options.colored);
                progress.inc(1);
                commits
            })
            .collect()
    });

    let mut report = StandupReport::new(repos.len());
    for (repo, commits) in repos.into_iter().zip(results) {
        report.push(repo, commits);
    }
    Ok(report)
}
