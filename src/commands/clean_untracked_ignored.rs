//! Delete untracked and ignored files in one go.

use super::CommandContext;
use super::error::Result;
use crate::infra::git::GitRunner;
use crate::shared::ui::{Notification, Ui, confirm};

pub async fn run<R: GitRunner, U: Ui>(ctx: &CommandContext<R, U>) -> Result<()> {
    let root = ctx.locate_root().await?;

    if !confirm(
        &ctx.ui,
        "This will permanently delete all untracked and ignored files. This action cannot be undone.",
        "Continue",
        "Cancel",
    )? {
        return Ok(());
    }

    tracing::info!("Cleaning untracked and ignored files...");
    let output = ctx.git(&root, &["clean", "-Xfd"]).await?;
    if let Some(stderr) = &output.stderr {
        tracing::warn!("{}", stderr.trim_end());
    }

    let notification = if output.stdout.trim().is_empty() {
        tracing::info!("No untracked or ignored files to remove");
        Notification::info("No untracked or ignored files found to clean.")
    } else {
        tracing::info!("Removed files:\n{}", output.stdout.trim_end());
        Notification::info(output.stdout.trim_end())
    };
    ctx.ui.notify(&notification.with_output());
    Ok(())
}
