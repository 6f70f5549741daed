//! `user@host:cwd` segment.

use std::path::{Component, Path, PathBuf};

use crate::env::EnvLookup;
use crate::styling::ColorId;

/// Placeholder for a user or host name that could not be determined.
const UNKNOWN: &str = "?";

/// Format a directory path in fish style: home becomes `~` and every
/// component except the last is cut to its first character.
///
/// Hidden directories keep their dot plus one character, as fish does.
///
/// Examples (home = `/home/user`):
/// - `/home/user/workspace/project` -> `~/w/project`
/// - `/home/user` -> `~`
/// - `/tmp/test` -> `/t/test`
/// - `/home/user/.config/nvim` -> `~/.c/nvim`
pub fn abbreviate(path: &Path, home: Option<&Path>) -> String {
    let (root, rest) = match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) => ("~", rest),
        None if path.has_root() => ("/", path.strip_prefix("/").unwrap_or(path)),
        None => ("", path),
    };

    let parts: Vec<String> = rest
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let Some((last, parents)) = parts.split_last() else {
        return if root.is_empty() { ".".to_string() } else { root.to_string() };
    };

    let mut result = String::from(root);
    if root == "~" {
        result.push('/');
    }
    for part in parents {
        result.push_str(&shorten(part));
        result.push('/');
    }
    result.push_str(last);
    result
}

fn shorten(part: &str) -> String {
    let keep = if part.starts_with('.') { 2 } else { 1 };
    part.chars().take(keep).collect()
}

/// Who and where the prompt is drawn for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPath {
    pub user: String,
    pub host: String,
    pub cwd: PathBuf,
    pub home: Option<PathBuf>,
}

impl UserPath {
    /// Gather user, host and home from the environment.
    ///
    /// User comes from `USER` then `USERNAME`; host from `HOSTNAME`, then the
    /// system host name. Either falls back to `?`.
    pub fn detect(env: &dyn EnvLookup, cwd: PathBuf) -> Self {
        let user = env
            .first_of(&["USER", "USERNAME"])
            .unwrap_or_else(|| UNKNOWN.to_string());
        let host = env
            .var("HOSTNAME")
            .or_else(system_hostname)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let home = env.var("HOME").map(PathBuf::from).or_else(home::home_dir);
        Self {
            user,
            host,
            cwd,
            home,
        }
    }

    /// `<green>user@host<reset>:<blue>~/a/b/cwd<reset>`
    pub fn render(&self) -> String {
        let who = ColorId::Green.wrap(format!("{}@{}", self.user, self.host));
        let cwd = ColorId::Blue.wrap(abbreviate(&self.cwd, self.home.as_deref()));
        format!("{who}:{cwd}")
    }
}

fn system_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .map(|h| h.to_string_lossy().into_owned())
        .filter(|h| !h.is_empty())
}
