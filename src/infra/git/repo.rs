//! Repository root discovery.

use std::path::{Path, PathBuf};

use super::error::{GitError, Result};
use super::runner::GitRunner;

/// Where to look for a repository when the action carries no path.
///
/// These are the host's "ambient" context, passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocateHints {
    /// Root reported by the host's own source-control integration.
    pub scm_root: Option<PathBuf>,
    /// The document that currently has focus.
    pub active_document: Option<PathBuf>,
    /// Open workspace folders, tried in order.
    pub workspace_folders: Vec<PathBuf>,
}

/// Find the repository root to operate on.
///
/// Tries the SCM root, then the active document, then every workspace folder.
pub async fn locate(runner: &impl GitRunner, hints: &LocateHints) -> Result<PathBuf> {
    if let Some(root) = hints.scm_root.as_ref().filter(|p| p.is_dir()) {
        tracing::debug!("Found git root via SCM integration: {}", root.display());
        return Ok(root.clone());
    }

    if let Some(document) = &hints.active_document {
        tracing::debug!(
            "Trying to find git root from active document: {}",
            document.display()
        );
        match repo_root_for(runner, document).await {
            Ok(root) => return Ok(root),
            Err(e) => tracing::debug!("Active document not in a git repository: {e}"),
        }
    }

    for folder in &hints.workspace_folders {
        tracing::debug!("Checking workspace folder: {}", folder.display());
        match repo_root_for(runner, folder).await {
            Ok(root) => return Ok(root),
            Err(e) => tracing::debug!("{} is not a git repository: {e}", folder.display()),
        }
    }

    Err(GitError::NotAGitRepository(
        "no git repository found in the active document or workspace folders".to_string(),
    ))
}

/// Get the repository root containing `path` via `git rev-parse --show-toplevel`.
///
/// Files (and paths that do not exist) are resolved from their parent directory.
pub async fn repo_root_for(runner: &impl GitRunner, path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(GitError::NotAGitRepository("path is empty".to_string()));
    }

    let cwd = working_dir_for(path);
    let output = runner
        .run(&["rev-parse", "--show-toplevel"], &cwd)
        .await
        .map_err(|e| {
            let reason = e
                .stderr()
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| e.to_string());
            GitError::NotAGitRepository(format!("{} ({reason})", path.display()))
        })?;

    let root = output.stdout.trim_end();
    if root.is_empty() {
        return Err(GitError::NotAGitRepository(format!(
            "{} (git reported no toplevel)",
            path.display()
        )));
    }

    tracing::debug!("Found git root: {root}");
    Ok(PathBuf::from(root))
}

fn working_dir_for(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.to_path_buf();
    }
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
