//! Prune stale remote-tracking refs and delete local branches whose upstream is gone.

use std::path::Path;

use super::CommandContext;
use super::error::Result;
use crate::infra::git::{GitRunner, parse_orphaned_branches};
use crate::shared::ui::{Notification, Ui, confirm, plural};

pub async fn run<R: GitRunner, U: Ui>(ctx: &CommandContext<R, U>) -> Result<()> {
    let root = ctx.locate_root().await?;

    tracing::info!("Step 1: Pruning remote references...");
    ctx.git(&root, &["remote", "prune", ctx.remote()]).await?;

    tracing::info!("Step 2: Finding orphaned local branches...");
    let branch_vv = ctx.git(&root, &["branch", "-vv"]).await?;
    let orphaned = parse_orphaned_branches(&branch_vv.stdout);
    tracing::info!("Found orphaned branches: {}", list_or_none(&orphaned));

    if orphaned.is_empty() {
        ctx.ui.notify(
            &Notification::info("Git cleanup complete! No orphaned branches found.").with_output(),
        );
        return Ok(());
    }

    let message = format!(
        "Found {}: {}\n\nDelete {}? This action cannot be undone.",
        plural(orphaned.len(), "orphaned local branch", "orphaned local branches"),
        orphaned.join(", "),
        if orphaned.len() == 1 {
            "this branch"
        } else {
            "these branches"
        },
    );
    if !confirm(&ctx.ui, &message, "Delete Branches", "Skip Deletion")? {
        tracing::info!("User chose to skip branch deletion");
        ctx.ui.notify(
            &Notification::info(
                "Git cleanup complete! Remote pruning done, branch deletion skipped.",
            )
            .with_output(),
        );
        return Ok(());
    }

    tracing::info!("Step 3: Deleting orphaned branches...");
    let report = delete_branches(ctx, &root, &orphaned, "-D").await;
    let notification = if report.failed.is_empty() {
        Notification::info(format!(
            "Git cleanup complete! Deleted {}.",
            plural(report.deleted, "orphaned branch", "orphaned branches")
        ))
    } else {
        Notification::warning(format!(
            "Git cleanup partially complete. {}",
            report.summary(orphaned.len())
        ))
    };
    ctx.ui.notify(&notification.with_output());
    Ok(())
}

/// Result of deleting a batch of branches one by one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub deleted: usize,
    pub failed: Vec<String>,
}

impl DeletionReport {
    /// `"Deleted 1/3 branches. Failed: a, b"`
    pub fn summary(&self, attempted: usize) -> String {
        format!(
            "Deleted {}/{attempted} branches. Failed: {}",
            self.deleted,
            self.failed.join(", ")
        )
    }
}

/// `git branch <flag> <name>` for each branch; a failure does not stop the rest.
pub async fn delete_branches<R: GitRunner, U: Ui>(
    ctx: &CommandContext<R, U>,
    root: &Path,
    branches: &[String],
    flag: &str,
) -> DeletionReport {
    let mut report = DeletionReport::default();
    for branch in branches {
        match ctx.git(root, &["branch", flag, branch]).await {
            Ok(output) => {
                tracing::info!("Deleted branch: {branch} {}", output.stdout.trim());
                report.deleted += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to delete branch {branch}: {e}");
                report.failed.push(branch.clone());
            }
        }
    }
    report
}

pub(super) fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
