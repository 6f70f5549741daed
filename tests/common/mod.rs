use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Git environment that ignores the developer's config and pins dates and
/// locale, applied per command.
const GIT_ENV: &[(&str, &str)] = &[
    ("GIT_CONFIG_GLOBAL", "/dev/null"),
    ("GIT_CONFIG_SYSTEM", "/dev/null"),
    ("GIT_AUTHOR_NAME", "Test User"),
    ("GIT_AUTHOR_EMAIL", "test@example.com"),
    ("GIT_COMMITTER_NAME", "Test User"),
    ("GIT_COMMITTER_EMAIL", "test@example.com"),
    ("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z"),
    ("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z"),
    ("LC_ALL", "C"),
    ("LANG", "C"),
];

/// Whether a `git` executable is on PATH. Tests that need a real repository
/// return early without it.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

pub struct TestRepo {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestRepo {
    /// Create a new repository on branch `main` with one committed file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("repo");
        std::fs::create_dir(&root).expect("Failed to create repo directory");
        // Canonicalize to resolve symlinks (macOS /var -> /private/var)
        let root = root
            .canonicalize()
            .expect("Failed to canonicalize temp path");

        let repo = Self {
            _temp_dir: temp_dir,
            root,
        };
        repo.git(&["init", "-b", "main"]);
        repo.write("file.txt", "initial\n");
        repo.git(&["add", "."]);
        repo.git(&["commit", "-m", "initial"]);
        repo
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Run git in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> Output {
        let output = Command::new("git")
            .args(args)
            .envs(GIT_ENV.iter().copied())
            .current_dir(&self.root)
            .output()
            .unwrap_or_else(|e| panic!("Failed to run git {args:?}: {e}"));
        if !output.status.success() {
            panic!(
                "git {:?} failed:\nstdout: {}\nstderr: {}",
                args,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        output
    }

    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.root.join(name), contents).expect("Failed to write file");
    }

    /// Detach HEAD at the current commit, returning its short hash.
    pub fn detach_head(&self) -> String {
        let output = self.git(&["rev-parse", "--short", "HEAD"]);
        let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
        self.git(&["checkout", "--detach", "HEAD"]);
        sha
    }

    /// The binary under test, run inside the repository.
    pub fn command(&self) -> Command {
        let mut cmd = promptline_command();
        cmd.current_dir(&self.root);
        cmd.envs(GIT_ENV.iter().copied());
        cmd
    }
}

/// The binary with a config path that doesn't exist, so the developer's own
/// config never leaks in.
pub fn promptline_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_promptline"));
    cmd.env("PROMPTLINE_CONFIG_PATH", "/nonexistent/promptline/config.toml");
    for key in [
        "PROMPTLINE_SEGMENTS",
        "PROMPTLINE_SEPARATOR",
        "PROMPTLINE_COLOR",
        "PROMPTLINE_MAX_WIDTH",
        "PROMPTLINE_GIT_PROGRAM",
        "PROMPTLINE_PYTHON_PROGRAM",
        "PROMPTLINE_COMMAND_TIMEOUT_MS",
        "VIRTUAL_ENV",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
