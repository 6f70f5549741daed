//! Git branch state for the prompt.
//!
//! Runs `git status`, classifies its output and renders the branch segment.
//! See [`status`] for the parser and [`format`] for the renderer.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::shell_exec::{Cmd, CommandRunner};

pub mod error;
pub mod format;
pub mod status;

pub use error::ParseFailure;
pub use format::{DisplayFormat, Marker};
pub use status::{ConditionFlags, RepositoryStatus};

/// Repository context for the directory the prompt is drawn in.
///
/// # Examples
///
/// ```no_run
/// use promptline::git::Repository;
/// use promptline::shell_exec::SystemRunner;
///
/// let repo = Repository::at(".");
/// if let Some(segment) = repo.branch_state(&SystemRunner)? {
///     print!("{segment}");
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
    program: String,
    timeout: Option<Duration>,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            program: "git".to_string(),
            timeout: None,
        }
    }

    /// Use a different git executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Give up on `git status` after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `git status` in the long format, forced to the C locale so the
    /// English phrases the parser matches are what git prints.
    pub fn status_command(&self) -> Cmd {
        let cmd = Cmd::new(&self.program)
            .arg("status")
            .current_dir(&self.path)
            .env("LC_ALL", "C")
            .context(self.path.display().to_string());
        match self.timeout {
            Some(timeout) => cmd.timeout(timeout),
            None => cmd,
        }
    }

    /// Raw `git status` output, stderr included.
    pub fn status_text(&self, runner: &dyn CommandRunner) -> anyhow::Result<String> {
        let cmd = self.status_command();
        let output = runner
            .run(&cmd)
            .with_context(|| format!("Failed to run `{}`", cmd.display()))?;
        Ok(output.text)
    }

    /// Parsed status, or `None` when git reports no usable status (not a
    /// repository, fatal error, unexpected output).
    pub fn status(&self, runner: &dyn CommandRunner) -> anyhow::Result<Option<RepositoryStatus>> {
        let text = self.status_text(runner)?;
        match status::parse(&text) {
            Ok(status) => Ok(Some(status)),
            Err(e) => {
                log::debug!("No branch state for {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Rendered branch segment, or `None` when there is nothing to show.
    pub fn branch_state(&self, runner: &dyn CommandRunner) -> anyhow::Result<Option<String>> {
        Ok(self.status(runner)?.as_ref().map(format::render))
    }
}
