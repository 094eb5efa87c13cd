//! Tracing setup and the append-only output log.
//!
//! Full command detail (command lines, stderr, exit codes) goes to the output
//! log; `--verbose` mirrors it to stderr.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::shared::dirs;
use crate::shared::env_var::EnvVars;

const LOG_FILE_NAME: &str = "output.log";
const DEFAULT_FILTER: &str = "debug";
const VERBOSE_STDERR_FILTER: &str = "debug";

/// Handle to the output log that notifications can point the user at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputLog {
    path: Option<PathBuf>,
}

impl OutputLog {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// No log file (e.g. the log directory could not be created).
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Keeps the background log writer alive; flushes on drop.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Directory for the output log: `$GIT_NINJA_LOG_DIR`, else `~/.cache/git-ninja`.
pub fn log_dir(env: &EnvVars) -> Option<PathBuf> {
    env.log_dir
        .clone()
        .map(PathBuf::from)
        .or_else(dirs::cache_dir)
}

/// Install the global tracing subscriber. Call once, from `main`.
pub fn init(env: &EnvVars, verbose: bool) -> (OutputLog, LogGuard) {
    let filter_spec = env.log_filter.as_deref().unwrap_or(DEFAULT_FILTER);

    let file = log_dir(env).and_then(|dir| match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(e) => {
            eprintln!("Warning: cannot create log directory {}: {e}", dir.display());
            None
        }
    });

    let (output_log, file_layer, guard) = match file {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(make_filter(filter_spec));
            (
                OutputLog::at(dir.join(LOG_FILE_NAME)),
                Some(layer),
                Some(guard),
            )
        }
        None => (OutputLog::disabled(), None, None),
    };

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(make_filter(VERBOSE_STDERR_FILTER))
    });

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    (output_log, LogGuard { _file: guard })
}

fn make_filter(spec: &str) -> EnvFilter {
    EnvFilter::try_new(spec).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
