use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StandupError>;

#[derive(Error, Debug)]
pub enum StandupError {
    #[error("could not determine git user.name, please specify --author")]
    IdentityUnavailable,
    #[error("Path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
