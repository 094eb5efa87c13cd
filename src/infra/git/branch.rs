//! Branch enumeration and parsing of `git branch` output.

use std::collections::BTreeSet;
use std::path::Path;

use lazy_regex::regex_is_match;

use super::error::{GitError, Result};
use super::runner::GitRunner;

/// List branch names from local heads and `<remote>`'s remote-tracking refs.
///
/// A branch that exists both locally and on the remote appears once under its
/// local name. The result is sorted ascending.
pub async fn list_branches(
    runner: &impl GitRunner,
    root: &Path,
    remote: &str,
) -> Result<Vec<String>> {
    let remote_refs = format!("refs/remotes/{remote}");
    let output = runner
        .run(
            &[
                "for-each-ref",
                "--format=%(refname:short)",
                "refs/heads",
                &remote_refs,
            ],
            root,
        )
        .await
        .map_err(|e| GitError::Query(format!("failed to list branches: {e}")))?;

    let branches = merge_branch_names(&output.stdout, remote);
    tracing::debug!("Found branches: {}", branches.join(", "));
    Ok(branches)
}

/// Merge `for-each-ref` short names into a sorted, duplicate-free list.
fn merge_branch_names(for_each_ref: &str, remote: &str) -> Vec<String> {
    let prefix = format!("{remote}/");
    let names: Vec<&str> = for_each_ref
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let locals: BTreeSet<&str> = names
        .iter()
        .copied()
        .filter(|name| !name.starts_with(&prefix) && *name != remote)
        .collect();

    let remote_only: BTreeSet<&str> = names
        .iter()
        .filter_map(|name| name.strip_prefix(&prefix))
        .filter(|name| *name != "HEAD" && !locals.contains(name))
        .collect();

    locals
        .union(&remote_only)
        .map(|name| name.to_string())
        .collect()
}

/// Get the name of the checked-out branch (empty when HEAD is detached).
pub async fn current_branch(runner: &impl GitRunner, root: &Path) -> Result<String> {
    let output = runner.run(&["branch", "--show-current"], root).await?;
    Ok(output.stdout.trim().to_string())
}

/// Branch names from `git branch` output, excluding `current`.
///
/// The `(HEAD detached at ...)` pseudo-entry is not a branch and is skipped.
pub fn parse_local_branches(branch_output: &str, current: &str) -> Vec<String> {
    branch_output
        .lines()
        .map(strip_branch_marker)
        .filter(|name| !name.is_empty() && !name.starts_with('(') && *name != current)
        .map(str::to_string)
        .collect()
}

/// Local branches whose upstream is gone, from `git branch -vv` output.
///
/// The checked-out branch (marked with `*`) is never included.
pub fn parse_orphaned_branches(branch_vv: &str) -> Vec<String> {
    branch_vv
        .lines()
        .filter(|line| regex_is_match!(r"\[[^\]]*: gone\]", line))
        .filter(|line| !line.trim_start().starts_with('*'))
        .filter_map(|line| strip_branch_marker(line).split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Strip the `* ` (current) or `+ ` (checked out in another worktree) marker.
fn strip_branch_marker(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(['*', '+'])
        .map(str::trim_start)
        .unwrap_or(line)
}
