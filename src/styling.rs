//! Terminal styling for prompt output.
//!
//! This module uses the anstyle ecosystem:
//! - anstream for color-choice aware printing
//! - anstyle for the escape sequences behind [`ColorId`]
//!
//! Prompt segments embed raw SGR sequences in the strings they return, so the
//! escape mapping here is a fixed lookup: every [`ColorId`] always renders to
//! the same bytes.

use std::fmt;

use anstyle::{AnsiColor, Color, Style};
use serde::{Deserialize, Serialize};

// ============================================================================
// Re-exports from anstream
// ============================================================================

/// Print that honors the global [`anstream::ColorChoice`]
pub use anstream::print;

/// Eprintln that honors the global [`anstream::ColorChoice`]
pub use anstream::eprintln;

// ============================================================================
// Semantic Style Constants
// ============================================================================

/// Error style (red) - use as `{ERROR}text{ERROR:#}`
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

// ============================================================================
// Color lookup table
// ============================================================================

/// The closed set of colors a prompt segment can use.
///
/// `Black` doubles as the "default" color of a branch with no recognized
/// condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ColorId {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Dim,
    Reset,
}

impl ColorId {
    /// The escape sequence that switches the terminal to this color.
    pub fn ansi(self) -> String {
        match self {
            ColorId::Reset => anstyle::Reset.render().to_string(),
            other => other.style().render().to_string(),
        }
    }

    /// The anstyle [`Style`] behind this color (`Reset` maps to the empty style).
    pub fn style(self) -> Style {
        let fg = |c: AnsiColor| Style::new().fg_color(Some(Color::Ansi(c)));
        match self {
            ColorId::Black => fg(AnsiColor::Black),
            ColorId::Red => fg(AnsiColor::Red),
            ColorId::Green => fg(AnsiColor::Green),
            ColorId::Yellow => fg(AnsiColor::Yellow),
            ColorId::Blue => fg(AnsiColor::Blue),
            ColorId::Magenta => fg(AnsiColor::Magenta),
            ColorId::Cyan => fg(AnsiColor::Cyan),
            ColorId::White => fg(AnsiColor::White),
            ColorId::Dim => Style::new().dimmed(),
            ColorId::Reset => Style::new(),
        }
    }

    /// Wrap `text` in this color followed by a reset.
    pub fn wrap(self, text: impl fmt::Display) -> String {
        format!("{}{text}{}", self.ansi(), ColorId::Reset.ansi())
    }
}

// ============================================================================
// Color choice
// ============================================================================

/// When to emit escape sequences on stdout.
///
/// Prompts are usually captured through command substitution, where stdout
/// is not a terminal, so the default is `Always`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ColorMode {
    Auto,
    #[default]
    Always,
    Never,
}

impl ColorMode {
    /// Install this mode as the process-wide anstream color choice.
    pub fn apply(self) {
        let choice = match self {
            ColorMode::Auto => anstream::ColorChoice::Auto,
            ColorMode::Always => anstream::ColorChoice::Always,
            ColorMode::Never => anstream::ColorChoice::Never,
        };
        choice.write_global();
    }
}

/// Visible width of a rendered segment, ignoring escape sequences.
pub fn visible_width(rendered: &str) -> usize {
    use ansi_str::AnsiStr;
    use unicode_width::UnicodeWidthStr;

    rendered.ansi_strip().width()
}

// ============================================================================
// Tests
// ============================================================================
