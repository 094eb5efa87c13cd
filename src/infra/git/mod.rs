//! Git operations via the `git` executable.
//!
//! Every query and mutation is a `git` subprocess run through [`GitRunner`];
//! its text output is parsed here.

mod branch;
mod clean;
mod error;
mod repo;
mod runner;
mod status;

pub use branch::{current_branch, list_branches, parse_local_branches, parse_orphaned_branches};
pub use clean::{DRY_RUN_PREFIX, REMOVED_PREFIX, parse_clean_output};
pub use error::GitError;
pub use repo::{LocateHints, locate, repo_root_for};
pub use runner::{CommandOutput, GitRunner, RealGitRunner};
pub use status::{TrackStatus, track_status};
