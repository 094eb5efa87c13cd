//! Git error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    /// `git` exited non-zero or could not be spawned.
    #[error("{message}")]
    Process {
        message: String,
        exit_code: Option<i32>,
        stderr: Option<String>,
    },

    #[error("Not a git repository: {0}")]
    NotAGitRepository(String),

    #[error("Git query failed: {0}")]
    Query(String),
}

impl GitError {
    /// Exit code of the failed process, if the failure came from one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Process { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    /// Captured stderr of the failed process, if any was written.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Process { stderr, .. } => stderr.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitError>;
