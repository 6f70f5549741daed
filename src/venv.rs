//! Python virtual environment banner.
//!
//! Shown only while `VIRTUAL_ENV` is set:
//!
//! ```text
//! VIRTUAL_ENV=/home/bob/app/.venv, python 3.10.7  ->  (.venv[3.10.7]@app)
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::env::EnvLookup;
use crate::shell_exec::{Cmd, CommandRunner};
use crate::styling::ColorId;

const VERSION_PREFIX: &str = "Python ";

#[derive(Debug)]
pub enum VenvError {
    /// The interpreter could not be started.
    Spawn { program: String, source: std::io::Error },
    /// `python --version` printed nothing that looks like a version.
    VersionUnavailable { output: String },
}

impl fmt::Display for VenvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenvError::Spawn { program, source } => {
                write!(f, "Failed to run `{program} --version`: {source}")
            }
            VenvError::VersionUnavailable { output } => {
                write!(f, "Failed to parse python version from {:?}", output.trim())
            }
        }
    }
}

impl std::error::Error for VenvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VenvError::Spawn { source, .. } => Some(source),
            VenvError::VersionUnavailable { .. } => None,
        }
    }
}

/// Text following `Python ` on the first line that contains it.
pub fn parse_python_version(output: &str) -> Option<&str> {
    output.lines().find_map(|line| {
        let start = line.find(VERSION_PREFIX)? + VERSION_PREFIX.len();
        Some(line[start..].trim()).filter(|v| !v.is_empty())
    })
}

/// An active virtual environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvState {
    /// Directory name of the environment, e.g. `.venv`.
    pub name: String,
    /// Directory containing the environment, e.g. `app`.
    pub origin: String,
    pub python_version: String,
}

impl VenvState {
    /// Describe the active environment, or `None` when `VIRTUAL_ENV` is unset.
    pub fn detect(
        env: &dyn EnvLookup,
        runner: &dyn CommandRunner,
        python: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<Self>, VenvError> {
        let Some(virtual_env) = env.var("VIRTUAL_ENV") else {
            return Ok(None);
        };

        let mut cmd = Cmd::new(python).arg("--version").context("venv");
        if let Some(timeout) = timeout {
            cmd = cmd.timeout(timeout);
        }
        let output = runner.run(&cmd).map_err(|source| VenvError::Spawn {
            program: python.to_string(),
            source,
        })?;
        let version = parse_python_version(&output.text).ok_or_else(|| {
            VenvError::VersionUnavailable {
                output: output.text.clone(),
            }
        })?;

        let path = Path::new(&virtual_env);
        let file_name = |p: Option<&Path>| {
            p.and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        Ok(Some(Self {
            name: file_name(Some(path)),
            origin: file_name(path.parent()),
            python_version: version.to_string(),
        }))
    }

    /// `(<name>[<version>]@<origin>)` in cyan.
    pub fn render(&self) -> String {
        ColorId::Cyan.wrap(format!(
            "({}[{}]@{})",
            self.name, self.python_version, self.origin
        ))
    }
}
