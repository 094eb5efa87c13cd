//! Toggle a path in `.git/info/exclude`.

use std::path::{Path, PathBuf};

use super::CommandContext;
use super::error::{CommandError, Result};
use super::path_context::LocationRef;
use crate::infra::git::GitRunner;
use crate::shared::ui::{Notification, Ui};

/// Whether the toggle added or removed the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

pub async fn run<R: GitRunner, U: Ui>(ctx: &CommandContext<R, U>, reference: LocationRef) -> Result<()> {
    let path = ctx.resolve(reference).await?;
    let toggled = toggle(&path.repo_root, &path.relative_path)?;

    let message = match toggled {
        Toggled::Added => format!("Added to .git/info/exclude: {}", path.relative_path),
        Toggled::Removed => format!("Removed from .git/info/exclude: {}", path.relative_path),
    };
    ctx.ui.notify(&Notification::info(message));
    Ok(())
}

pub fn exclude_file(repo_root: &Path) -> PathBuf {
    repo_root.join(".git").join("info").join("exclude")
}

/// Add `entry` when absent, remove every occurrence when present.
///
/// The file is rewritten normalized: trimmed non-empty lines, newline-terminated.
pub fn toggle(repo_root: &Path, entry: &str) -> std::result::Result<Toggled, CommandError> {
    let path = exclude_file(repo_root);
    if let Some(dir) = path.parent()
        && !dir.exists()
    {
        std::fs::create_dir_all(dir)?;
        tracing::debug!("Created {}", dir.display());
    }

    let mut lines = read_entries(&path)?;
    let toggled = if lines.iter().any(|line| line == entry) {
        lines.retain(|line| line != entry);
        Toggled::Removed
    } else {
        lines.push(entry.to_string());
        Toggled::Added
    };

    let content = if lines.is_empty() {
        String::new()
    } else {
        lines.join("\n") + "\n"
    };
    std::fs::write(&path, content)?;
    tracing::info!("{toggled:?} {entry} in {}", path.display());

    Ok(toggled)
}

/// Whether `entry` is listed in the exclude file. A missing file lists nothing.
pub fn contains(repo_root: &Path, entry: &str) -> std::result::Result<bool, CommandError> {
    Ok(read_entries(&exclude_file(repo_root))?
        .iter()
        .any(|line| line == entry))
}

fn read_entries(path: &Path) -> std::io::Result<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, fake_root, toplevel};
    use crate::shared::testing::{RecordingUi, ScriptedRunner, TestRepo};
    use indoc::indoc;

    #[test]
    fn toggle_creates_info_dir_and_file() {
        let (_dir, root) = fake_root();

        assert_eq!(toggle(&root, "a/b.txt").unwrap(), Toggled::Added);
        assert_eq!(
            std::fs::read_to_string(exclude_file(&root)).unwrap(),
            "a/b.txt\n"
        );
    }

    #[test]
    fn toggle_removes_every_occurrence_and_normalizes() {
        let (_dir, root) = fake_root();
        std::fs::create_dir_all(root.join(".git/info")).unwrap();
        std::fs::write(
            exclude_file(&root),
            "  *.log \n\nsecret.env\n*.log\n",
        )
        .unwrap();

        assert_eq!(toggle(&root, "*.log").unwrap(), Toggled::Removed);
        assert_eq!(
            std::fs::read_to_string(exclude_file(&root)).unwrap(),
            "secret.env\n"
        );
    }

    #[test]
    fn toggle_twice_restores_normalized_file() {
        let (_dir, root) = fake_root();
        std::fs::create_dir_all(root.join(".git/info")).unwrap();
        let original = indoc! {"
            # git ls-files --others --exclude-from=.git/info/exclude
            *.swp
        "};
        std::fs::write(exclude_file(&root), original).unwrap();

        toggle(&root, "notes.md").unwrap();
        assert!(contains(&root, "notes.md").unwrap());
        toggle(&root, "notes.md").unwrap();

        assert_eq!(
            std::fs::read_to_string(exclude_file(&root)).unwrap(),
            original
        );
    }

    #[test]
    fn contains_on_missing_file_is_false() {
        let (_dir, root) = fake_root();
        assert!(!contains(&root, "a.txt").unwrap());
    }

    #[tokio::test]
    async fn run_twice_leaves_empty_file() {
        let (_dir, root) = fake_root();
        std::fs::create_dir_all(root.join("a")).unwrap();
        std::fs::write(root.join("a/b.txt"), "").unwrap();
        let runner = toplevel(ScriptedRunner::new(), &root);
        let ctx = context(runner, RecordingUi::new(), &root);
        let reference = LocationRef::Path(root.join("a/b.txt"));

        run(&ctx, reference.clone()).await.unwrap();
        run(&ctx, reference).await.unwrap();

        assert_eq!(std::fs::read_to_string(exclude_file(&root)).unwrap(), "");
        let messages: Vec<String> = ctx
            .ui
            .notifications()
            .iter()
            .map(|n| n.message().to_string())
            .collect();
        assert_eq!(
            messages,
            [
                "Added to .git/info/exclude: a/b.txt",
                "Removed from .git/info/exclude: a/b.txt",
            ]
        );
    }

    #[tokio::test]
    async fn excluded_file_disappears_from_untracked_listing() {
        let repo = TestRepo::new();
        repo.write_file("local.env", "KEY=1");
        let ctx = context(crate::infra::git::RealGitRunner, RecordingUi::new(), &repo.path());

        run(&ctx, LocationRef::Path("local.env".into())).await.unwrap();

        let untracked = repo.git(&["ls-files", "--others", "--exclude-standard"]);
        assert!(!untracked.contains("local.env"), "got: {untracked}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinked_file_is_excluded_under_its_own_name() {
        let repo = TestRepo::new();
        repo.write_file("real.txt", "x");
        std::os::unix::fs::symlink("real.txt", repo.path().join("link.txt")).unwrap();
        let ctx = context(crate::infra::git::RealGitRunner, RecordingUi::new(), &repo.path());

        run(&ctx, LocationRef::Path("link.txt".into())).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(exclude_file(&repo.path())).unwrap(),
            "link.txt\n"
        );
        assert_eq!(
            ctx.ui.only_notification().message(),
            "Added to .git/info/exclude: link.txt"
        );
    }
}
