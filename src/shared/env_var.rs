//! Centralized reader for GIT_NINJA_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const REPO_ROOT: &str = "GIT_NINJA_REPO_ROOT";
const LOG: &str = "GIT_NINJA_LOG";
const LOG_DIR: &str = "GIT_NINJA_LOG_DIR";

/// Snapshot of all GIT_NINJA_* environment variables at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    /// Repository root reported by the host editor's source-control
    /// integration. Used before spawning `git rev-parse`.
    pub repo_root: Option<String>,

    /// tracing filter directive for the output log (default: "debug").
    pub log_filter: Option<String>,

    /// Directory for the output log (default: ~/.cache/git-ninja).
    pub log_dir: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all GIT_NINJA_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            repo_root: non_empty_var(REPO_ROOT),
            log_filter: non_empty_var(LOG),
            log_dir: non_empty_var(LOG_DIR),
        }
    }
}
