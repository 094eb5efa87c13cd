use anyhow::{Context, Result};
use notify_rust::Notification as RustNotification;

use super::notification::{Notification, Severity};

const APP_NAME: &str = "git-ninja";

/// Sends a notification to the desktop notification daemon.
pub fn send(notification: &Notification) -> Result<()> {
    let summary = match notification.severity() {
        Severity::Info => APP_NAME.to_string(),
        Severity::Warning => format!("{APP_NAME}: warning"),
        Severity::Error => format!("{APP_NAME}: error"),
    };

    RustNotification::new()
        .appname(APP_NAME)
        .summary(&summary)
        .body(notification.message())
        .show()
        .context("failed to send notification via notify-rust")?;

    Ok(())
}
