//! Prompt line composition.
//!
//! Renders each configured [`Segment`], drops the empty ones and joins the
//! rest with the configured separator. A segment whose collaborator fails is
//! left out rather than failing the whole prompt: a prompt that errors is
//! worse than a prompt missing one piece.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::PromptConfig;
use crate::env::EnvLookup;
use crate::git::Repository;
use crate::path::UserPath;
use crate::shell_exec::CommandRunner;
use crate::styling::visible_width;
use crate::venv::VenvState;

/// One piece of the prompt line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Segment {
    /// Python virtual environment banner
    Venv,
    /// `user@host:cwd`
    Path,
    /// Git branch state
    Branch,
}

impl Segment {
    /// Lower = more important. Segments with the highest number are dropped
    /// first when the line is too wide.
    pub fn priority(self) -> u8 {
        match self {
            Segment::Branch => 0,
            Segment::Path => 1,
            Segment::Venv => 2,
        }
    }
}

/// Everything a prompt render needs from the outside world.
pub struct PromptContext<'a> {
    pub config: &'a PromptConfig,
    pub env: &'a dyn EnvLookup,
    pub runner: &'a dyn CommandRunner,
    pub cwd: PathBuf,
}

impl PromptContext<'_> {
    /// Render a single segment; `None` when it has nothing to show.
    pub fn render_segment(&self, segment: Segment) -> Option<String> {
        let rendered = match segment {
            Segment::Branch => Repository::at(&self.cwd)
                .with_program(&self.config.git_program)
                .with_timeout(self.config.command_timeout())
                .branch_state(self.runner)
                .map_err(|e| log::debug!("Skipping branch segment: {e:#}"))
                .ok()
                .flatten(),
            Segment::Venv => VenvState::detect(
                self.env,
                self.runner,
                &self.config.python_program,
                self.config.command_timeout(),
            )
            .map_err(|e| log::debug!("Skipping venv segment: {e}"))
            .ok()
            .flatten()
            .map(|venv| venv.render()),
            Segment::Path => Some(UserPath::detect(self.env, self.cwd.clone()).render()),
        };
        rendered.filter(|s| !s.is_empty())
    }

    /// The full prompt line.
    pub fn render(&self) -> String {
        let parts: Vec<(Segment, String)> = self
            .config
            .segments
            .iter()
            .filter_map(|&segment| self.render_segment(segment).map(|s| (segment, s)))
            .collect();

        let parts = match self.config.max_width {
            Some(max_width) => fit_to_width(parts, max_width, &self.config.separator),
            None => parts,
        };

        parts
            .into_iter()
            .map(|(_, s)| s)
            .collect::<Vec<_>>()
            .join(&self.config.separator)
    }
}

fn total_width(parts: &[(Segment, String)], separator: &str) -> usize {
    if parts.is_empty() {
        return 0;
    }
    let content: usize = parts.iter().map(|(_, s)| visible_width(s)).sum();
    content + (parts.len() - 1) * visible_width(separator)
}

/// Drop the least important segments until the line fits in `max_width`
/// visible columns. The most important segment is always kept.
fn fit_to_width(
    mut parts: Vec<(Segment, String)>,
    max_width: usize,
    separator: &str,
) -> Vec<(Segment, String)> {
    while parts.len() > 1 && total_width(&parts, separator) > max_width {
        let Some(drop_at) = parts
            .iter()
            .enumerate()
            .max_by_key(|(i, (segment, _))| (segment.priority(), *i))
            .map(|(i, _)| i)
        else {
            break;
        };
        let (segment, _) = parts.remove(drop_at);
        log::debug!("Dropped {segment} segment to fit {max_width} columns");
    }
    parts
}
