//! Index status of a single path.

use std::path::Path;

use super::error::{GitError, Result};
use super::runner::GitRunner;

/// Tag `git ls-files -v` prints for skip-worktree entries.
const SKIP_WORKTREE_TAG: char = 'S';

/// Whether git tracks a path, and whether its skip-worktree bit is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackStatus {
    pub tracked: bool,
    /// Always false when `tracked` is false.
    pub skip_worktree: bool,
}

impl TrackStatus {
    pub const UNTRACKED: Self = Self {
        tracked: false,
        skip_worktree: false,
    };

    /// Parse `git ls-files -v -- <path>` output.
    pub fn from_ls_files(output: &str) -> Self {
        let out = output.trim();
        if out.is_empty() {
            return Self::UNTRACKED;
        }

        Self {
            tracked: true,
            skip_worktree: out.starts_with(SKIP_WORKTREE_TAG),
        }
    }
}

/// Query the track status of `relative_path` (root-relative, `/`-separated).
pub async fn track_status(
    runner: &impl GitRunner,
    root: &Path,
    relative_path: &str,
) -> Result<TrackStatus> {
    let output = runner
        .run(&["ls-files", "-v", "--", relative_path], root)
        .await
        .map_err(|e| GitError::Query(format!("failed to check skip-worktree status: {e}")))?;

    let status = TrackStatus::from_ls_files(&output.stdout);
    tracing::debug!(
        raw = output.stdout.trim(),
        tracked = status.tracked,
        skip_worktree = status.skip_worktree,
        "ls-files status for {relative_path}"
    );
    Ok(status)
}
