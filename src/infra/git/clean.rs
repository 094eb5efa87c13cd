//! Parsing of `git clean` output.

/// Line prefix of `git clean -n` (dry run).
pub const DRY_RUN_PREFIX: &str = "Would remove ";

/// Line prefix of `git clean -f`.
pub const REMOVED_PREFIX: &str = "Removing ";

/// Extract the paths from `git clean` output lines starting with `prefix`.
pub fn parse_clean_output(output: &str, prefix: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix(prefix))
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect()
}
