// ABOUTME: Application-wide error types for flotilla.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::instance::{InstanceError, ManagerError};
use crate::repo::RepoError;
use crate::systemd::CommandError;
use crate::types::SuffixError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("invalid suffix: {0}")]
    Suffix(#[from] SuffixError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Manager(#[from] ManagerError),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Instance(#[from] InstanceError),
}

pub type Result<T> = std::result::Result<T, Error>;
