use std::path::{Component, Path};

/// Header shown above a repository's commits: its path relative to `root`
/// joined with `/`, or the root's own name when the repository is the root.
pub fn repo_header(root: &Path, repo: &Path) -> String {
    let relative = match repo.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => repo.display().to_string(),
    };

    if relative.is_empty() {
        base_name(repo)
    } else {
        relative
    }
}

pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
