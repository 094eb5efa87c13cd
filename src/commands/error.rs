use std::path::PathBuf;

use thiserror::Error;

use crate::infra::git::GitError;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid file reference: {0}")]
    InvalidReference(String),

    #[error(
        "File \"{0}\" is not tracked by Git. To use skip-worktree, the file must first be added to Git tracking. Use: git add \"{0}\""
    )]
    UntrackedPath(String),

    #[error("File \"{path}\" does not exist in branch \"{branch}\"")]
    BranchContentMissing { path: String, branch: String },

    #[error(
        "Command executed but status verification failed for {path} (expected {expected}); the change may still have been applied"
    )]
    VerificationMismatch { path: String, expected: String },

    #[error("No branches found in this repository")]
    NoBranches,

    #[error("Checkout completed but file not found on disk: {}", .0.display())]
    CheckoutFileMissing(PathBuf),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// The underlying git failure, if this error wraps one.
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = anyhow::Result<T>;
