use std::path::{Path, PathBuf};

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A follow-up the user can take from a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    /// Reveal the output log.
    ShowOutput,
    /// Open documentation in a browser.
    OpenUrl(String),
    /// Open the affected file.
    ShowFile(PathBuf),
}

/// A result message to be displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    severity: Severity,
    message: String,
    actions: Vec<NotificationAction>,
}

impl Notification {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            actions: Vec::new(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Adds a follow-up action.
    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds the "Show Output" action.
    pub fn with_output(self) -> Self {
        self.with_action(NotificationAction::ShowOutput)
    }

    /// Adds a "Show File" action for `path`.
    pub fn with_file(self, path: &Path) -> Self {
        self.with_action(NotificationAction::ShowFile(path.to_path_buf()))
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn actions(&self) -> &[NotificationAction] {
        &self.actions
    }
}
