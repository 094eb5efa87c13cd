//! Subprocess execution of the `git` executable.

use std::path::Path;

use tokio::process::Command;

use super::error::{GitError, Result};

/// Captured result of one successful `git` invocation.
///
/// `stderr` is informational: git writes progress and hints there even when
/// it succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: Option<String>,
}

#[cfg(test)]
impl CommandOutput {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: None,
        }
    }
}

/// Trait for executing `git` commands.
/// Enables dependency injection for testing without spawning processes.
pub trait GitRunner {
    /// Run `git <args>` in `cwd`. Spawns exactly one process, never retries.
    async fn run(&self, args: &[&str], cwd: &Path) -> Result<CommandOutput>;
}

/// Production implementation that executes the real `git` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealGitRunner;

impl GitRunner for RealGitRunner {
    async fn run(&self, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let command_line = render_command_line(args);
        tracing::debug!(cwd = %cwd.display(), "exec: {command_line}");

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            // Never block on an interactive credential prompt.
            .env("GIT_TERMINAL_PROMPT", "0")
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| GitError::Process {
                message: format!("failed to execute `{command_line}`: {e}"),
                exit_code: None,
                stderr: None,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = non_empty(String::from_utf8_lossy(&output.stderr).into_owned());

        if !output.status.success() {
            tracing::warn!(
                exit_code = ?output.status.code(),
                stderr = stderr.as_deref().unwrap_or(""),
                "command failed: {command_line}"
            );
            return Err(GitError::Process {
                message: format!("`{command_line}` failed ({})", output.status),
                exit_code: output.status.code(),
                stderr,
            });
        }

        if let Some(stderr) = &stderr {
            tracing::debug!("stderr: {}", stderr.trim_end());
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

/// Render `git <args>` as a shell-quoted line for logs and error messages.
fn render_command_line(args: &[&str]) -> String {
    let words = std::iter::once("git").chain(args.iter().copied());
    shlex::try_join(words).unwrap_or_else(|_| format!("git {}", args.join(" ")))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}
