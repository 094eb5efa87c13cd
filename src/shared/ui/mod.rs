//! The user-facing surface: prompts and result notifications.
//!
//! Commands only talk to the [`Ui`] trait; the terminal adapter is one
//! implementation, an editor bridge or a test double can be another.

mod desktop;
mod notification;
mod terminal;

pub use notification::{Notification, NotificationAction, Severity};
pub use terminal::TerminalUi;

/// Prompts and notifications, as offered by the host.
pub trait Ui {
    /// Let the user pick one of `items`. `None` when dismissed.
    fn pick(&self, title: &str, items: &[String]) -> anyhow::Result<Option<String>>;

    /// Modal dialog with `buttons`. Returns the chosen index, `None` when dismissed.
    fn choose(&self, message: &str, buttons: &[&str]) -> anyhow::Result<Option<usize>>;

    /// Show a long listing, e.g. every file a clean would remove.
    fn show_list(&self, title: &str, items: &[String]);

    /// Present a result.
    fn notify(&self, notification: &Notification);
}

/// Show a two-button dialog; true only when `accept` is chosen.
pub fn confirm(ui: &impl Ui, message: &str, accept: &str, cancel: &str) -> anyhow::Result<bool> {
    Ok(ui.choose(message, &[accept, cancel])? == Some(0))
}

/// `"1 branch"` / `"2 branches"`.
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
