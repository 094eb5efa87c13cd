use std::path::{Path, PathBuf};
use std::process::Command;

/// A temporary git repository for testing.
pub struct TestRepo {
    dir: tempfile::TempDir,
}

impl TestRepo {
    /// Create a git Command with isolated config (ignores global/system settings).
    fn git_command(dir: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir);
        // Ignore global/system git config to ensure tests are isolated from
        // local settings (e.g., GPG signing, aliases, hooks).
        cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
        cmd.env("GIT_CONFIG_SYSTEM", "/dev/null");
        cmd
    }

    fn run_in(dir: &Path, args: &[&str]) -> String {
        let output = Self::git_command(dir)
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Create a new test repository on `main` with an initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        Self::run_in(dir.path(), &["init", "--quiet"]);
        Self::run_in(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        Self::run_in(dir.path(), &["config", "user.email", "test@example.com"]);
        Self::run_in(dir.path(), &["config", "user.name", "Test User"]);
        Self::run_in(
            dir.path(),
            &["commit", "--allow-empty", "--quiet", "-m", "Initial commit"],
        );

        Self { dir }
    }

    /// Get the canonicalized path to the repository.
    /// This resolves symlinks (e.g., /var -> /private/var on macOS).
    pub fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize path")
    }

    /// Run git in the repository and return stdout.
    pub fn git(&self, args: &[&str]) -> String {
        Self::run_in(&self.path(), args)
    }

    /// Write a file relative to the repository root, creating parent dirs.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Stage everything and commit.
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "--all"]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Attach a bare repository as `origin` and push `main` to it.
    /// The returned TempDir keeps the bare repository alive.
    pub fn add_bare_origin(&self) -> tempfile::TempDir {
        let bare = tempfile::tempdir().expect("Failed to create temp dir");
        Self::run_in(bare.path(), &["init", "--bare", "--quiet"]);

        let url = bare.path().to_string_lossy().into_owned();
        self.git(&["remote", "add", "origin", &url]);
        self.git(&["push", "--quiet", "-u", "origin", "main"]);
        bare
    }

    /// Local branch names.
    pub fn local_branches(&self) -> Vec<String> {
        self.git(&["for-each-ref", "--format=%(refname:short)", "refs/heads"])
            .lines()
            .map(str::to_string)
            .collect()
    }
}
