//! User configuration.
//!
//! Read from a TOML file, then overridden by `PROMPTLINE_*` environment
//! variables (`PROMPTLINE_SEPARATOR=" | "`, `PROMPTLINE_SEGMENTS=path,branch`).
//! A missing file is not an error; every key has a default.
//!
//! ```toml
//! segments = ["venv", "path", "branch"]
//! separator = " "
//! color = "always"
//! command-timeout-ms = 500
//! max-width = 80
//! git-program = "git"
//! python-program = "python"
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::{Deserialize, Serialize};

use crate::prompt::Segment;
use crate::styling::ColorMode;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV_VAR: &str = "PROMPTLINE_CONFIG_PATH";

/// Override for the config path, set via the --config CLI flag
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Set the config path override (called from CLI --config flag)
pub fn set_config_path(path: PathBuf) {
    CONFIG_PATH.set(path).ok();
}

/// Get the config file path.
///
/// Priority:
/// 1. CLI --config flag (set via `set_config_path`)
/// 2. PROMPTLINE_CONFIG_PATH environment variable
/// 3. Platform config directory (`~/.config/promptline/config.toml` on Linux
///    and macOS, `%APPDATA%\promptline\config.toml` on Windows)
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = CONFIG_PATH.get() {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("promptline").join("config.toml"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PromptConfig {
    /// Segments to draw, left to right.
    pub segments: Vec<Segment>,
    /// Text placed between non-empty segments.
    pub separator: String,
    pub color: ColorMode,
    /// Kill external commands that run longer than this.
    #[serde(alias = "command_timeout_ms")]
    pub command_timeout_ms: Option<u64>,
    /// Drop low-priority segments until the visible line fits.
    #[serde(alias = "max_width")]
    pub max_width: Option<usize>,
    #[serde(alias = "git_program")]
    pub git_program: String,
    #[serde(alias = "python_program")]
    pub python_program: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            segments: vec![Segment::Venv, Segment::Path, Segment::Branch],
            separator: " ".to_string(),
            color: ColorMode::default(),
            command_timeout_ms: Some(500),
            max_width: None,
            git_program: "git".to_string(),
            python_program: "python".to_string(),
        }
    }
}

impl PromptConfig {
    /// Load from the configured path (see [`get_config_path`]) plus
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("No config directory; using defaults");
                Self::builder(None).build()?.try_deserialize()
            }
        }
    }

    /// Load from a specific file plus environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading config from {}", path.display());
        Self::builder(Some(path)).build()?.try_deserialize()
    }

    /// Parse TOML text without environment overrides.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder(path: Option<&Path>) -> config::ConfigBuilder<config::builder::DefaultState> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        builder.add_source(
            Environment::with_prefix("PROMPTLINE")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("segments"),
        )
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
