//! Delete files matched by .gitignore, after a dry-run preview.

use super::CommandContext;
use super::error::Result;
use crate::infra::git::{DRY_RUN_PREFIX, GitRunner, REMOVED_PREFIX, parse_clean_output};
use crate::shared::ui::{Notification, Ui, confirm, plural};

const DELETE: &str = "Delete Files";
const SHOW_ALL: &str = "Show All Files";
const CANCEL: &str = "Cancel";

pub async fn run<R: GitRunner, U: Ui>(ctx: &CommandContext<R, U>) -> Result<()> {
    let root = ctx.locate_root().await?;

    tracing::info!("Step 1: Previewing ignored files to be deleted...");
    let preview = ctx.git(&root, &["clean", "-ndX"]).await?;
    let files = parse_clean_output(&preview.stdout, DRY_RUN_PREFIX);
    if files.is_empty() {
        ctx.ui
            .notify(&Notification::info("No ignored files found to clean.").with_output());
        return Ok(());
    }

    let message = format!(
        "Found {} to delete:\n\n{}\n\nThis will permanently delete all files listed in .gitignore. This action cannot be undone.",
        plural(files.len(), "ignored file", "ignored files"),
        preview_text(&files, ctx.config.clean.preview_limit)
    );
    match ctx.ui.choose(&message, &[DELETE, SHOW_ALL, CANCEL])? {
        Some(0) => {}
        Some(1) => {
            tracing::info!("Files to be deleted:\n  {}", files.join("\n  "));
            ctx.ui.show_list("Files to be deleted", &files);
            let again = format!(
                "Delete all {}? This action cannot be undone.",
                plural(files.len(), "ignored file", "ignored files")
            );
            if !confirm(&ctx.ui, &again, DELETE, CANCEL)? {
                tracing::info!("User cancelled deletion after viewing files");
                return Ok(());
            }
        }
        _ => {
            tracing::info!("User cancelled deletion");
            return Ok(());
        }
    }

    tracing::info!("Step 2: Deleting ignored files...");
    let removed = ctx.git(&root, &["clean", "-fdX"]).await?;
    let deleted = parse_clean_output(&removed.stdout, REMOVED_PREFIX);
    for file in &deleted {
        tracing::info!("Deleted: {file}");
    }

    ctx.ui.notify(
        &Notification::info(format!(
            "Deleted {} from .gitignore",
            plural(deleted.len(), "ignored file", "ignored files")
        ))
        .with_output(),
    );
    Ok(())
}

/// The first `limit` files, one per line, with a count of the rest.
fn preview_text(files: &[String], limit: usize) -> String {
    if files.len() <= limit {
        return files.join("\n");
    }
    format!(
        "{}\n... and {} more files",
        files[..limit].join("\n"),
        files.len() - limit
    )
}
