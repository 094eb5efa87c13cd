//! In-memory stand-ins for the git runner and the UI.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::infra::git::{CommandOutput, GitError, GitRunner};
use crate::shared::ui::{Notification, Ui};

type Response = Result<CommandOutput, (i32, String)>;

/// A recorded `git` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// A `GitRunner` that answers from a script instead of spawning git.
///
/// Responses registered for the same argv are consumed in order; the last one
/// is repeated for any further calls. Unscripted commands fail with exit 1.
#[derive(Default)]
pub struct ScriptedRunner {
    script: RefCell<Vec<(Vec<String>, VecDeque<Response>)>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `git <args>` with `stdout`.
    pub fn on(self, args: &[&str], stdout: &str) -> Self {
        self.push(args, Ok(CommandOutput::new(stdout)))
    }

    /// Answer `git <args>` with a non-zero exit and `stderr`.
    pub fn fail(self, args: &[&str], stderr: &str) -> Self {
        self.push(args, Err((1, stderr.to_string())))
    }

    fn push(self, args: &[&str], response: Response) -> Self {
        let key: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        {
            let mut script = self.script.borrow_mut();
            match script.iter_mut().find(|(k, _)| *k == key) {
                Some((_, queue)) => queue.push_back(response),
                None => script.push((key, VecDeque::from([response]))),
            }
        }
        self
    }

    /// All invocations so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Whether any invocation started with `prefix`.
    pub fn was_called(&self, prefix: &[&str]) -> bool {
        self.calls.borrow().iter().any(|call| {
            call.args.len() >= prefix.len() && call.args.iter().zip(prefix).all(|(a, p)| a == p)
        })
    }
}

impl GitRunner for ScriptedRunner {
    async fn run(&self, args: &[&str], cwd: &Path) -> Result<CommandOutput, GitError> {
        let key: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.calls.borrow_mut().push(Call {
            args: key.clone(),
            cwd: cwd.to_path_buf(),
        });

        let response = {
            let mut script = self.script.borrow_mut();
            script
                .iter_mut()
                .find(|(k, _)| *k == key)
                .and_then(|(_, queue)| {
                    if queue.len() > 1 {
                        queue.pop_front()
                    } else {
                        queue.front().cloned()
                    }
                })
        };

        match response {
            Some(Ok(output)) => Ok(output),
            Some(Err((code, stderr))) => Err(GitError::Process {
                message: format!("`git {}` failed", args.join(" ")),
                exit_code: Some(code),
                stderr: Some(stderr),
            }),
            None => Err(GitError::Process {
                message: format!("unscripted command: git {}", args.join(" ")),
                exit_code: Some(1),
                stderr: None,
            }),
        }
    }
}

/// A prompt shown through [`RecordingUi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Pick { title: String, items: Vec<String> },
    Choose { message: String, buttons: Vec<String> },
}

/// A `Ui` that replays scripted answers and records everything shown.
///
/// Prompts without a scripted answer are dismissed (`None`).
#[derive(Default)]
pub struct RecordingUi {
    picks: RefCell<VecDeque<Option<String>>>,
    choices: RefCell<VecDeque<Option<usize>>>,
    prompts: RefCell<Vec<Prompt>>,
    notifications: RefCell<Vec<Notification>>,
    lists: RefCell<Vec<Vec<String>>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next pick prompt with `item`.
    pub fn pick_answer(self, item: &str) -> Self {
        self.picks.borrow_mut().push_back(Some(item.to_string()));
        self
    }

    /// Answer the next dialog with the button at `index`.
    pub fn choose_answer(self, index: usize) -> Self {
        self.choices.borrow_mut().push_back(Some(index));
        self
    }

    /// Dismiss the next dialog.
    pub fn choose_dismiss(self) -> Self {
        self.choices.borrow_mut().push_back(None);
        self
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.borrow().clone()
    }

    pub fn dialogs(&self) -> Vec<String> {
        self.prompts
            .borrow()
            .iter()
            .filter_map(|p| match p {
                Prompt::Choose { message, .. } => Some(message.clone()),
                Prompt::Pick { .. } => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    /// The single notification shown, panicking if there was not exactly one.
    pub fn only_notification(&self) -> Notification {
        let notifications = self.notifications.borrow();
        assert_eq!(
            notifications.len(),
            1,
            "expected one notification, got {notifications:?}"
        );
        notifications[0].clone()
    }

    pub fn lists(&self) -> Vec<Vec<String>> {
        self.lists.borrow().clone()
    }
}

impl Ui for RecordingUi {
    fn pick(&self, title: &str, items: &[String]) -> anyhow::Result<Option<String>> {
        self.prompts.borrow_mut().push(Prompt::Pick {
            title: title.to_string(),
            items: items.to_vec(),
        });
        Ok(self.picks.borrow_mut().pop_front().flatten())
    }

    fn choose(&self, message: &str, buttons: &[&str]) -> anyhow::Result<Option<usize>> {
        self.prompts.borrow_mut().push(Prompt::Choose {
            message: message.to_string(),
            buttons: buttons.iter().map(|b| b.to_string()).collect(),
        });
        Ok(self.choices.borrow_mut().pop_front().flatten())
    }

    fn show_list(&self, _title: &str, items: &[String]) {
        self.lists.borrow_mut().push(items.to_vec());
    }

    fn notify(&self, notification: &Notification) {
        self.notifications.borrow_mut().push(notification.clone());
    }
}
