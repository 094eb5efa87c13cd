//! Toggle the skip-worktree bit of a tracked file.

use std::path::Path;

use tokio::time::Instant;

use super::CommandContext;
use super::error::{CommandError, Result};
use super::path_context::LocationRef;
use crate::infra::git::{GitError, GitRunner, TrackStatus, track_status};
use crate::shared::config::RetryPolicy;
use crate::shared::ui::{Notification, Ui};

pub async fn run<R: GitRunner, U: Ui>(ctx: &CommandContext<R, U>, reference: LocationRef) -> Result<()> {
    let path = ctx.resolve(reference).await?;
    if !path.absolute_path.exists() {
        return Err(CommandError::InvalidReference(format!(
            "File does not exist: {}",
            path.absolute_path.display()
        ))
        .into());
    }

    let status = track_status(&ctx.runner, &path.repo_root, &path.relative_path).await?;
    let expected = match status {
        TrackStatus { tracked: false, .. } => {
            return Err(CommandError::UntrackedPath(path.relative_path).into());
        }
        TrackStatus {
            skip_worktree: false,
            ..
        } => true,
        TrackStatus {
            skip_worktree: true,
            ..
        } => false,
    };

    let flag = if expected {
        "--skip-worktree"
    } else {
        "--no-skip-worktree"
    };
    ctx.git(
        &path.repo_root,
        &["update-index", flag, "--", &path.relative_path],
    )
    .await?;

    let policy = RetryPolicy::from(&ctx.config.verify);
    let verified = verify(
        &ctx.runner,
        &path.repo_root,
        &path.relative_path,
        expected,
        policy,
    )
    .await?;
    if !verified {
        return Err(CommandError::VerificationMismatch {
            path: path.relative_path,
            expected: describe(expected).to_string(),
        }
        .into());
    }

    let short = if expected {
        "ignoring local changes"
    } else {
        "tracking changes"
    };
    tracing::info!("Set {} to {}", path.relative_path, describe(expected));
    ctx.ui.notify(
        &Notification::info(format!("{} is now {short}", path.file_name())).with_output(),
    );
    Ok(())
}

fn describe(skip_worktree: bool) -> &'static str {
    if skip_worktree {
        "skip-worktree"
    } else {
        "normal tracking"
    }
}

/// Re-read the index until the skip-worktree bit equals `expected`.
///
/// Only the read is repeated, at least once. Each delay is cut short by the
/// timeout. Returns false once attempts or time run out.
pub async fn verify(
    runner: &impl GitRunner,
    root: &Path,
    relative_path: &str,
    expected: bool,
    policy: RetryPolicy,
) -> std::result::Result<bool, GitError> {
    let started = Instant::now();

    for attempt in 0..policy.max_attempts.max(1) {
        let remaining = policy.timeout.saturating_sub(started.elapsed());
        if attempt > 0 && remaining.is_zero() {
            tracing::debug!("Verification timed out after {attempt} attempts");
            break;
        }
        tokio::time::sleep(policy.delay_for(attempt).min(remaining)).await;

        let status = track_status(runner, root, relative_path).await?;
        tracing::debug!(
            "Verification attempt {} - expected: {expected}, got: {}",
            attempt + 1,
            status.skip_worktree
        );
        if status.skip_worktree == expected {
            return Ok(true);
        }
    }

    tracing::warn!(
        "{relative_path}: git command may have succeeded but verification failed"
    );
    Ok(false)
}
