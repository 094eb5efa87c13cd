use std::path::PathBuf;

const APP_DIR: &str = "git-ninja";

/// Returns the user's home directory from the HOME environment variable.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Returns git-ninja's cache directory ($XDG_CACHE_HOME/git-ninja or ~/.cache/git-ninja).
/// Empty values are treated as unset per XDG Base Directory Specification.
pub fn cache_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache").map(|d| d.join(APP_DIR))
}

/// Returns git-ninja's config directory ($XDG_CONFIG_HOME/git-ninja or ~/.config/git-ninja).
/// Empty values are treated as unset per XDG Base Directory Specification.
pub fn config_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join(APP_DIR))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    match std::env::var(var).ok().filter(|v| !v.is_empty()) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home_dir().map(|home| home.join(home_fallback)),
    }
}
