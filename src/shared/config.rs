use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::shared::dirs;

/// Top-level configuration for git-ninja.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Remote used for branch listing, pruning and fetching (default: "origin").
    #[serde(default = "default_remote")]
    #[schemars(default = "default_remote")]
    pub remote: String,

    /// Skip-worktree verification settings.
    #[serde(default)]
    pub verify: VerifyConfig,

    /// Clean command settings.
    #[serde(default)]
    pub clean: CleanConfig,

    /// Notification settings.
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            verify: VerifyConfig::default(),
            clean: CleanConfig::default(),
            notification: NotificationConfig::default(),
        }
    }
}

/// How the skip-worktree toggle re-reads the index after mutating it.
///
/// The n-th re-read waits `initial_delay_ms * backoff_factor^(n-1)`.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VerifyConfig {
    /// Delay before the first re-read, in milliseconds (default: 100).
    #[serde(default = "default_initial_delay_ms")]
    #[schemars(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Multiplier applied to the delay for each further re-read (default: 5).
    #[serde(default = "default_backoff_factor")]
    #[schemars(default = "default_backoff_factor")]
    pub backoff_factor: u32,

    /// Maximum number of re-reads (default: 2).
    #[serde(default = "default_max_attempts")]
    #[schemars(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Upper bound on total time spent verifying, in milliseconds (default: 2000).
    #[serde(default = "default_timeout_ms")]
    #[schemars(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            backoff_factor: default_backoff_factor(),
            max_attempts: default_max_attempts(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Clean command configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CleanConfig {
    /// Number of files listed in the confirmation dialog (default: 10).
    #[serde(default = "default_preview_limit")]
    #[schemars(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            preview_limit: default_preview_limit(),
        }
    }
}

/// Notification configuration.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// Also send results as desktop notifications (default: false).
    #[serde(default)]
    pub desktop: bool,
}

/// Bounded retry schedule for read-after-write verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub backoff_factor: u32,
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl RetryPolicy {
    /// No waiting at all; for tests.
    #[cfg(test)]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            initial_delay: Duration::ZERO,
            backoff_factor: 1,
            max_attempts,
            timeout: Duration::from_secs(5),
        }
    }

    /// Delay before the given attempt (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(self.backoff_factor.saturating_pow(attempt))
    }
}

impl From<&VerifyConfig> for RetryPolicy {
    fn from(config: &VerifyConfig) -> Self {
        Self {
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            backoff_factor: config.backoff_factor.max(1),
            max_attempts: config.max_attempts.max(1),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_initial_delay_ms() -> u64 {
    100
}

fn default_backoff_factor() -> u32 {
    5
}

fn default_max_attempts() -> u32 {
    2
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_preview_limit() -> usize {
    10
}

const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Load `config.yaml` (or `config.yml`) from git-ninja's config directory.
pub fn load_config() -> Result<Config, ConfigError> {
    match dirs::config_dir() {
        Some(dir) => load_config_from_dir(&dir),
        None => Ok(Config::default()),
    }
}

/// Load the first config file found in `dir`; defaults when there is none.
pub fn load_config_from_dir(dir: &Path) -> Result<Config, ConfigError> {
    for path in CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)) {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        tracing::debug!("Loading config from {}", path.display());
        return serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path,
            message: e.to_string(),
        });
    }

    tracing::debug!("No config file in {}, using defaults", dir.display());
    Ok(Config::default())
}

/// The config file `load_config_from_dir` reads from `dir`, or where a new one belongs.
pub fn config_file_in(dir: &Path) -> PathBuf {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| dir.join(CONFIG_FILE_NAMES[0]))
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
