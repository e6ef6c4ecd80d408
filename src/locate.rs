//! Repository discovery.

use crate::error::{Result, StandupError};
use crate::model::Repository;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Name of the git metadata directory.
pub const MARKER: &str = ".git";

/// What to do with a directory met during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Descend,
    /// Parent is a repository; the marker itself is not entered.
    Record,
    Prune,
}

pub fn classify(name: &str, skip_dirs: &[String]) -> Visit {
    if name == MARKER {
        Visit::Record
    } else if skip_dirs.iter().any(|skip| skip == name) {
        Visit::Prune
    } else {
        Visit::Descend
    }
}

/// Walks `root` depth-first and returns every repository below it, in the
/// order the walk meets them. Any walk error aborts the whole search.
pub fn locate_repositories(root: &Path, skip_dirs: &[String]) -> Result<Vec<Repository>> {
    let meta = std::fs::metadata(root).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => StandupError::RootNotFound(root.to_path_buf()),
        _ => StandupError::Io(err),
    })?;
    if !meta.is_dir() {
        return Err(StandupError::RootNotDirectory(root.to_path_buf()));
    }

    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();
    scan(&mut walker, skip_dirs)
}

/// A directory met by the walk.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    pub depth: usize,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Pre-order directory walk that can skip the subtree it just yielded.
pub trait Walk {
    fn next_entry(&mut self) -> Option<Result<WalkEntry>>;
    fn skip_current_dir(&mut self);
}

impl Walk for walkdir::IntoIter {
    fn next_entry(&mut self) -> Option<Result<WalkEntry>> {
        self.next().map(|entry| {
            let entry = entry?;
            Ok(WalkEntry {
                depth: entry.depth(),
                is_dir: entry.file_type().is_dir(),
                path: entry.into_path(),
            })
        })
    }

    fn skip_current_dir(&mut self) {
        walkdir::IntoIter::skip_current_dir(self);
    }
}

/// Records repositories met by `walk`. The first error discards everything found so far.
pub fn scan<W: Walk>(walk: &mut W, skip_dirs: &[String]) -> Result<Vec<Repository>> {
    let mut repos = Vec::new();

    while let Some(entry) = walk.next_entry() {
        let entry = entry?;
        if entry.depth == 0 || !entry.is_dir {
            continue;
        }

        let name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match classify(&name, skip_dirs) {
            Visit::Descend => {}
            Visit::Record => {
                if let Some(parent) = entry.path.parent() {
                    debug!(repo = %parent.display(), "found repository");
                    repos.push(Repository::new(parent));
                }
                walk.skip_current_dir();
            }
            Visit::Prune => {
                debug!(dir = %entry.path.display(), "skipping directory");
                walk.skip_current_dir();
            }
        }
    }

    Ok(repos)
}
