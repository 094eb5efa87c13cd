use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::Action;
use crate::commands::config::ConfigCommands;
use crate::commands::error::CommandError;
use crate::commands::path_context::LocationRef;

#[derive(Parser)]
#[command(
    name = "git-ninja",
    bin_name = "gn",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Context an editor passes along with every action.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Workspace folder to search for a repository, in order (default: current directory)
    #[arg(long = "workspace", value_name = "DIR", global = true)]
    pub workspaces: Vec<PathBuf>,

    /// File that currently has focus in the editor
    #[arg(long, value_name = "PATH", global = true)]
    pub active_file: Option<PathBuf>,

    /// Accept every confirmation dialog without prompting
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Mirror the output log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// The file an action applies to.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct TargetArgs {
    /// File path, absolute or relative to the current directory
    #[arg(required_unless_present = "reference", conflicts_with = "reference")]
    pub path: Option<PathBuf>,

    /// Editor file reference as JSON: {"fsPath": ...} or {"resourceUri": {"fsPath": ...}}
    #[arg(long, value_name = "JSON")]
    pub reference: Option<String>,
}

impl TargetArgs {
    pub fn location(self) -> Result<LocationRef, CommandError> {
        match (self.path, self.reference) {
            (_, Some(json)) => LocationRef::from_json(&json),
            (Some(path), None) => Ok(LocationRef::Path(path)),
            (None, None) => Err(CommandError::InvalidReference(
                "no file path given".to_string(),
            )),
        }
    }
}

#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct CheckoutArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Branch to take the file from (skips the branch picker)
    #[arg(short, long)]
    pub branch: Option<String>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Toggle a file in .git/info/exclude
    Exclude(TargetArgs),

    /// Toggle the skip-worktree bit of a tracked file
    SkipWorktree(TargetArgs),

    /// Replace a file with its version from another branch
    Checkout(CheckoutArgs),

    /// Prune remote refs and delete local branches whose upstream is gone
    Cleanup,

    /// Fetch with prune and delete local branches merged into HEAD
    PruneRemotes,

    /// Delete files ignored by .gitignore
    CleanIgnored,

    /// Delete untracked and ignored files
    CleanUntrackedIgnored,

    /// Show whether a file is tracked, skip-worktree or excluded
    Status(TargetArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// The repository action this subcommand performs, if it is one.
    pub fn into_action(self) -> Option<Result<Action, CommandError>> {
        let action = match self {
            Self::Exclude(target) => target.location().map(Action::Exclude),
            Self::SkipWorktree(target) => target.location().map(Action::SkipWorktree),
            Self::Checkout(CheckoutArgs { target, branch }) => target
                .location()
                .map(|reference| Action::Checkout { reference, branch }),
            Self::Cleanup => Ok(Action::Cleanup),
            Self::PruneRemotes => Ok(Action::PruneRemotes),
            Self::CleanIgnored => Ok(Action::CleanIgnored),
            Self::CleanUntrackedIgnored => Ok(Action::CleanUntrackedIgnored),
            Self::Status(target) => target.location().map(Action::Status),
            Self::Config(_) | Self::Completions { .. } => return None,
        };
        Some(action)
    }
}
