use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;

/// Directory names that are pruned during discovery unless overridden.
pub const DEFAULT_SKIP_DIRS: &[&str] = &["node_modules", "vendor"];

/// Root of a discovered repository (the parent of its `.git` directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One rendered `git log` line. Passed through to the report untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitEntry(pub String);

impl CommitEntry {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Filter context for a whole run. Built once from the command line.
#[derive(Debug, Clone)]
pub struct StandupQuery {
    author: String,
    days: u32,
    root: PathBuf,
    skip_dirs: Vec<String>,
}

impl StandupQuery {
    pub fn new(author: impl Into<String>, days: u32, root: impl Into<PathBuf>) -> Self {
        Self {
            author: author.into(),
            days,
            root: root.into(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_extra_skip_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.skip_dirs.contains(&name) {
                self.skip_dirs.push(name);
            }
        }
        self
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Relative date understood by `git log --since`.
    pub fn since(&self) -> String {
        format!("{} days ago", self.days)
    }
}

#[derive(Debug, Clone)]
pub struct RepoActivity {
    pub repository: Repository,
    pub commits: Vec<CommitEntry>,
}

/// Repositories with at least one matching commit, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct StandupReport {
    scanned: usize,
    entries: Vec<RepoActivity>,
}

impl StandupReport {
    pub fn new(scanned: usize) -> Self {
        Self { scanned, entries: Vec::new() }
    }

    /// Appends `commits` for `repository`; empty results are dropped.
    pub fn push(&mut self, repository: Repository, commits: Vec<CommitEntry>) {
        if commits.is_empty() {
            return;
        }
        self.entries.push(RepoActivity { repository, commits });
    }

    pub fn scanned(&self) -> usize {
        self.scanned
    }

    pub fn entries(&self) -> &[RepoActivity] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOutput {
    pub path: String,
    pub name: String,
    pub commits: Vec<CommitEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandupOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub author: String,
    pub days: u32,
    pub repositories_scanned: usize,
    pub repositories: Vec<RepoOutput>,
}
