//! Fetch with pruning, then offer to delete local branches already merged into HEAD.

use super::CommandContext;
use super::cleanup::{delete_branches, list_or_none};
use super::error::Result;
use crate::infra::git::{GitRunner, current_branch, parse_local_branches};
use crate::shared::ui::{Notification, Ui, confirm, plural};

/// Local branches split by whether `git branch -d` would accept them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub deletable: Vec<String>,
    pub protected: Vec<String>,
}

impl Classification {
    /// Partition `locals` by membership in `merged`, keeping order.
    pub fn new(locals: Vec<String>, merged: &[String]) -> Self {
        let (deletable, protected): (Vec<String>, Vec<String>) =
            locals.into_iter().partition(|b| merged.contains(b));
        Self {
            deletable,
            protected,
        }
    }
}

pub async fn run<R: GitRunner, U: Ui>(ctx: &CommandContext<R, U>) -> Result<()> {
    let root = ctx.locate_root().await?;

    tracing::info!("Step 1: Fetching {} with prune...", ctx.remote());
    ctx.git(&root, &["fetch", ctx.remote(), "--prune"]).await?;

    tracing::info!("Step 2: Classifying local branches...");
    let current = current_branch(&ctx.runner, &root).await?;
    let branch_out = ctx.git(&root, &["branch"]).await?;
    let locals = parse_local_branches(&branch_out.stdout, &current);
    tracing::info!(
        "Found local branches (excluding current): {}",
        list_or_none(&locals)
    );

    if locals.is_empty() {
        ctx.ui.notify(
            &Notification::info("Git prune complete! No local branches found to check.")
                .with_output(),
        );
        return Ok(());
    }

    let merged_out = ctx.git(&root, &["branch", "--merged"]).await?;
    let merged = parse_local_branches(&merged_out.stdout, &current);
    let Classification {
        deletable,
        protected,
    } = Classification::new(locals, &merged);
    tracing::info!("Deletable branches: {}", list_or_none(&deletable));
    tracing::info!("Protected branches: {}", list_or_none(&protected));

    if deletable.is_empty() {
        let mut message = "Git prune complete! Remote references pruned.".to_string();
        if !protected.is_empty() {
            message.push_str(&format!(
                " Found {} that cannot be safely deleted.",
                plural(protected.len(), "local branch", "local branches")
            ));
        }
        ctx.ui.notify(&Notification::info(message).with_output());
        return Ok(());
    }

    let mut message = format!(
        "Git prune found {} that can be safely deleted: {}",
        plural(deletable.len(), "local branch", "local branches"),
        deletable.join(", ")
    );
    if !protected.is_empty() {
        message.push_str(&format!(
            "\n\n{} will be kept (not fully merged): {}",
            plural(protected.len(), "branch", "branches"),
            protected.join(", ")
        ));
    }
    message.push_str("\n\nDelete the safe branches?");

    if !confirm(&ctx.ui, &message, "Delete Safe Branches", "Skip Deletion")? {
        tracing::info!("User chose to skip branch deletion");
        ctx.ui.notify(
            &Notification::info("Git prune complete! Remote pruning done, branch deletion skipped.")
                .with_output(),
        );
        return Ok(());
    }

    tracing::info!("Step 3: Deleting safe local branches...");
    let report = delete_branches(ctx, &root, &deletable, "-d").await;
    let kept = (!protected.is_empty()).then(|| {
        format!(
            " Kept {} protected.",
            plural(protected.len(), "branch", "branches")
        )
    });

    let notification = if report.failed.is_empty() {
        Notification::info(format!(
            "Git prune complete! Deleted {}.{}",
            plural(report.deleted, "local branch", "local branches"),
            kept.unwrap_or_default()
        ))
    } else {
        Notification::warning(format!(
            "Git prune partially complete. {}.{}",
            report.summary(deletable.len()),
            kept.unwrap_or_default()
        ))
    };
    ctx.ui.notify(&notification.with_output());
    Ok(())
}
