use dialoguer::Select;

use super::desktop;
use super::notification::{Notification, NotificationAction, Severity};
use super::Ui;
use crate::shared::logging::OutputLog;

/// [`Ui`] backed by the controlling terminal.
pub struct TerminalUi {
    output_log: OutputLog,
    assume_yes: bool,
    desktop: bool,
}

impl TerminalUi {
    pub fn new(output_log: OutputLog) -> Self {
        Self {
            output_log,
            assume_yes: false,
            desktop: false,
        }
    }

    /// Answer every dialog with its first button instead of prompting.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Mirror notifications to the desktop notification daemon.
    pub fn with_desktop(mut self, enabled: bool) -> Self {
        self.desktop = enabled;
        self
    }
}

impl Ui for TerminalUi {
    fn pick(&self, title: &str, items: &[String]) -> anyhow::Result<Option<String>> {
        if self.assume_yes {
            anyhow::bail!("cannot choose \"{title}\" non-interactively; pass the value explicitly");
        }
        let selection = Select::new()
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact_opt()?;
        Ok(selection.and_then(|i| items.get(i).cloned()))
    }

    fn choose(&self, message: &str, buttons: &[&str]) -> anyhow::Result<Option<usize>> {
        if self.assume_yes {
            tracing::debug!(message, answer = ?buttons.first(), "dialog auto-accepted");
            return Ok((!buttons.is_empty()).then_some(0));
        }
        let selection = Select::new()
            .with_prompt(message)
            .items(buttons)
            .default(0)
            .interact_opt()?;
        Ok(selection)
    }

    fn show_list(&self, title: &str, items: &[String]) {
        println!("{}", render_list(title, items));
    }

    fn notify(&self, notification: &Notification) {
        let text = render_notification(notification, &self.output_log);
        match notification.severity() {
            Severity::Info => println!("{text}"),
            Severity::Warning | Severity::Error => eprintln!("{text}"),
        }

        if self.desktop
            && let Err(e) = desktop::send(notification)
        {
            tracing::warn!(error = %e, "desktop notification failed");
        }
    }
}

fn render_list(title: &str, items: &[String]) -> String {
    let mut out = format!("{title}:");
    for item in items {
        out.push_str("\n  ");
        out.push_str(item);
    }
    out
}

/// Notification text plus one line per follow-up action.
fn render_notification(notification: &Notification, output_log: &OutputLog) -> String {
    let prefix = match notification.severity() {
        Severity::Info => "",
        Severity::Warning => "warning: ",
        Severity::Error => "error: ",
    };
    let mut out = format!("{prefix}{}", notification.message());

    for action in notification.actions() {
        let line = match action {
            NotificationAction::ShowOutput => match output_log.path() {
                Some(path) => format!("  details: {}", path.display()),
                None => continue,
            },
            NotificationAction::OpenUrl(url) => format!("  docs: {url}"),
            NotificationAction::ShowFile(path) => format!("  file: {}", path.display()),
        };
        out.push('\n');
        out.push_str(&line);
    }
    out
}
