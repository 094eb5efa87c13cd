//! Turns whatever the caller handed us (a CLI path or an editor's JSON file
//! reference) into an absolute path plus its repository-relative form.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::CommandError;
use crate::infra::git::{GitError, GitRunner, repo_root_for};

/// A file reference as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationRef {
    /// Plain path from the command line, absolute or relative to the cwd.
    Path(PathBuf),
    /// File handle serialized by an editor.
    Editor(EditorReference),
}

/// `{ "fsPath": "...", "resourceUri": { "fsPath": "..." } }`
///
/// Context-menu actions on some views pass a wrapper whose `resourceUri`
/// holds the actual file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditorReference {
    #[serde(default)]
    fs_path: Option<String>,
    #[serde(default)]
    resource_uri: Option<Box<EditorReference>>,
}

impl LocationRef {
    /// Parse an editor reference from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CommandError> {
        serde_json::from_str(json)
            .map(Self::Editor)
            .map_err(|e| CommandError::InvalidReference(format!("malformed reference JSON: {e}")))
    }

    /// The file path carried by this reference; the wrapper field wins.
    fn fs_path(&self) -> Option<PathBuf> {
        match self {
            Self::Path(path) => Some(path.clone()).filter(|p| !p.as_os_str().is_empty()),
            Self::Editor(reference) => reference
                .resource_uri
                .as_ref()
                .and_then(|inner| non_empty(&inner.fs_path))
                .or_else(|| non_empty(&reference.fs_path))
                .map(PathBuf::from),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A file reference resolved against its repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    pub raw_reference: LocationRef,
    pub absolute_path: PathBuf,
    /// Root-relative, `/`-separated, never empty.
    pub relative_path: String,
    pub repo_root: PathBuf,
}

impl PathContext {
    pub async fn resolve(
        runner: &impl GitRunner,
        reference: LocationRef,
        cwd: &Path,
    ) -> Result<Self, CommandError> {
        let path = reference.fs_path().ok_or_else(|| {
            CommandError::InvalidReference("could not determine file path from selection".into())
        })?;

        let absolute_path = canonicalize_lenient(&cwd.join(path));
        let repo_root = repo_root_for(runner, &absolute_path).await?;

        if !repo_root.join(".git").exists() {
            return Err(GitError::NotAGitRepository(format!(
                "{} has no .git entry",
                repo_root.display()
            ))
            .into());
        }

        let relative_path = relative_to(&absolute_path, &repo_root)?;
        tracing::debug!(
            "Resolved {} as {relative_path} in {}",
            absolute_path.display(),
            repo_root.display()
        );

        Ok(Self {
            raw_reference: reference,
            absolute_path,
            relative_path,
            repo_root,
        })
    }

    /// Last path component, for user-facing messages.
    pub fn file_name(&self) -> String {
        self.absolute_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.relative_path.clone())
    }
}

/// Canonicalize the parent of `path` and keep its last component as given.
///
/// git reports the toplevel with symlinks resolved, so the directories must be
/// resolved the same way before stripping the root. The file itself may be a
/// symlink with its own index entry and is never followed.
fn canonicalize_lenient(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.canonicalize().unwrap_or_else(|_| path.to_path_buf()),
    }
}

fn relative_to(path: &Path, root: &Path) -> Result<String, CommandError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        CommandError::InvalidReference(format!(
            "{} is outside the repository {}",
            path.display(),
            root.display()
        ))
    })?;

    let relative = relative.to_string_lossy().replace('\\', "/");
    if relative.is_empty() {
        return Err(CommandError::InvalidReference(format!(
            "{} is the repository root, not a file in it",
            path.display()
        )));
    }
    Ok(relative)
}
