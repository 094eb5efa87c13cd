//! Report how git currently treats a path.

use super::CommandContext;
use super::error::Result;
use super::exclude;
use super::path_context::LocationRef;
use crate::infra::git::{GitRunner, TrackStatus, track_status};
use crate::shared::ui::{Notification, Ui};

pub async fn run<R: GitRunner, U: Ui>(ctx: &CommandContext<R, U>, reference: LocationRef) -> Result<()> {
    let path = ctx.resolve(reference).await?;
    let status = track_status(&ctx.runner, &path.repo_root, &path.relative_path).await?;
    let excluded = exclude::contains(&path.repo_root, &path.relative_path)?;

    ctx.ui.notify(&Notification::info(describe(
        &path.relative_path,
        status,
        excluded,
    )));
    Ok(())
}

fn describe(relative_path: &str, status: TrackStatus, excluded: bool) -> String {
    let tracking = match status {
        TrackStatus { tracked: false, .. } => "untracked",
        TrackStatus {
            skip_worktree: true,
            ..
        } => "tracked, skip-worktree (local changes ignored)",
        TrackStatus { .. } => "tracked",
    };
    let exclude = if excluded {
        "listed in .git/info/exclude"
    } else {
        "not in .git/info/exclude"
    };
    format!("{relative_path}: {tracking}; {exclude}")
}
