//! One module per user-facing action, plus the dispatcher that turns their
//! results into notifications.

pub mod checkout;
pub mod clean_ignored;
pub mod clean_untracked_ignored;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod exclude;
pub mod path_context;
pub mod prune_remotes;
pub mod skip_worktree;
pub mod status;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::infra::git::{CommandOutput, GitError, GitRunner, LocateHints, locate};
use crate::shared::config::Config;
use crate::shared::ui::{Notification, NotificationAction, Ui};
use error::CommandError;
use path_context::{LocationRef, PathContext};

pub const SKIP_WORKTREE_DOCS_URL: &str =
    "https://git-scm.com/docs/git-update-index#_skip_worktree_bit";

/// Everything a command needs from its surroundings.
pub struct CommandContext<R, U> {
    pub runner: R,
    pub ui: U,
    pub config: Config,
    pub hints: LocateHints,
    /// Base for relative paths given on the command line.
    pub cwd: PathBuf,
}

impl<R: GitRunner, U: Ui> CommandContext<R, U> {
    /// Repository root for actions that do not target a single file.
    pub async fn locate_root(&self) -> Result<PathBuf, GitError> {
        let root = locate(&self.runner, &self.hints).await?;
        tracing::info!("Working in Git repository: {}", root.display());
        Ok(root)
    }

    pub async fn resolve(&self, reference: LocationRef) -> Result<PathContext, CommandError> {
        PathContext::resolve(&self.runner, reference, &self.cwd).await
    }

    /// Run `git <args>` in `root`.
    pub async fn git(&self, root: &Path, args: &[&str]) -> Result<CommandOutput, GitError> {
        self.runner.run(args, root).await
    }

    pub fn remote(&self) -> &str {
        &self.config.remote
    }
}

/// A UI action to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Exclude(LocationRef),
    SkipWorktree(LocationRef),
    Checkout {
        reference: LocationRef,
        branch: Option<String>,
    },
    Cleanup,
    PruneRemotes,
    CleanIgnored,
    CleanUntrackedIgnored,
    Status(LocationRef),
}

impl Action {
    /// Prefix for the error notification when the action fails.
    fn failure_title(&self) -> &'static str {
        match self {
            Self::Exclude(_) => "Toggle exclude failed",
            Self::SkipWorktree(_) => "Git skip-worktree failed",
            Self::Checkout { .. } => "Git checkout failed",
            Self::Cleanup => "Git cleanup failed",
            Self::PruneRemotes => "Git prune remotes failed",
            Self::CleanIgnored => "Git clean ignored files failed",
            Self::CleanUntrackedIgnored => "Failed to clean untracked and ignored files",
            Self::Status(_) => "Status query failed",
        }
    }
}

/// How an action ended, as far as the process exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Finished, or the user cancelled.
    Completed,
    /// Finished with a non-fatal warning.
    Warned,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Completed | Self::Warned => ExitCode::SUCCESS,
            Self::Failed => ExitCode::FAILURE,
        }
    }
}

/// Run `action`, reporting any failure as exactly one notification.
pub async fn run_action<R: GitRunner, U: Ui>(ctx: &CommandContext<R, U>, action: Action) -> Outcome {
    tracing::info!("{action:?} triggered");
    let title = action.failure_title();

    let result = match action {
        Action::Exclude(reference) => exclude::run(ctx, reference).await,
        Action::SkipWorktree(reference) => skip_worktree::run(ctx, reference).await,
        Action::Checkout { reference, branch } => checkout::run(ctx, reference, branch).await,
        Action::Cleanup => cleanup::run(ctx).await,
        Action::PruneRemotes => prune_remotes::run(ctx).await,
        Action::CleanIgnored => clean_ignored::run(ctx).await,
        Action::CleanUntrackedIgnored => clean_untracked_ignored::run(ctx).await,
        Action::Status(reference) => status::run(ctx, reference).await,
    };

    match result {
        Ok(()) => Outcome::Completed,
        Err(e) => report_failure(&ctx.ui, title, &e),
    }
}

fn report_failure(ui: &impl Ui, title: &str, err: &anyhow::Error) -> Outcome {
    let git = find_git_error(err);
    tracing::error!(
        exit_code = ?git.and_then(GitError::exit_code),
        stderr = git.and_then(GitError::stderr).unwrap_or(""),
        "{title}: {err:#}"
    );

    match err.downcast_ref::<CommandError>() {
        Some(CommandError::VerificationMismatch { .. }) => {
            ui.notify(&Notification::warning(err.to_string()).with_output());
            Outcome::Warned
        }
        Some(CommandError::UntrackedPath(_)) => {
            ui.notify(
                &Notification::error(err.to_string())
                    .with_action(NotificationAction::OpenUrl(SKIP_WORKTREE_DOCS_URL.into())),
            );
            Outcome::Failed
        }
        _ => {
            let mut message = format!("{title}: {err:#}");
            if let Some(stderr) = git.and_then(GitError::stderr) {
                message.push_str("\n\nGit error: ");
                message.push_str(stderr.trim());
            }
            ui.notify(&Notification::error(message).with_output());
            Outcome::Failed
        }
    }
}

/// The innermost git failure behind `err`, whether raw or wrapped.
fn find_git_error(err: &anyhow::Error) -> Option<&GitError> {
    err.chain().find_map(|cause| {
        cause
            .downcast_ref::<GitError>()
            .or_else(|| cause.downcast_ref::<CommandError>().and_then(CommandError::as_git))
    })
}
