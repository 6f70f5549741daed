//! Branch state rendering.
//!
//! Turns a [`RepositoryStatus`] into the colored, marker-suffixed branch
//! name shown in the prompt, using the VS Code style notation (`*` for
//! modified, `+` for staged, and so on).

use std::fmt;

use super::status::{ConditionFlags, RepositoryStatus};
use crate::styling::ColorId;

/// One-character condition marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Unstaged changes to tracked files.
    Modified,
    /// Shared by deletions and unmerged paths; appears at most once.
    DeletedOrConflict,
    Untracked,
    Staged,
}

impl Marker {
    pub fn glyph(self) -> char {
        match self {
            Marker::Modified => '*',
            Marker::DeletedOrConflict => '!',
            Marker::Untracked => '?',
            Marker::Staged => '+',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Markers and color derived from a status; rendered once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    pub markers: Vec<Marker>,
    pub color: ColorId,
}

impl DisplayFormat {
    pub fn symbols(&self) -> String {
        self.markers.iter().map(|m| m.glyph()).collect()
    }

    fn push_once(&mut self, marker: Marker) {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
    }
}

/// Derive markers and color.
///
/// Markers accumulate in a fixed order regardless of where the conditions
/// appeared in the status text. The color of the last applicable rule wins,
/// so conflicts beat staged changes, which beat working tree changes.
pub fn format(status: &RepositoryStatus) -> DisplayFormat {
    let flags = status.flags();
    let mut format = DisplayFormat {
        markers: Vec::new(),
        color: ColorId::Black,
    };

    if flags.contains(ConditionFlags::CLEAN) {
        format.color = ColorId::Green;
        return format;
    }
    if flags.contains(ConditionFlags::MODIFIED) {
        format.push_once(Marker::Modified);
        format.color = ColorId::Yellow;
    }
    if flags.contains(ConditionFlags::DELETED) {
        format.push_once(Marker::DeletedOrConflict);
        format.color = ColorId::Yellow;
    }
    if flags.contains(ConditionFlags::UNTRACKED) {
        format.push_once(Marker::Untracked);
        format.color = ColorId::Yellow;
    }
    if flags.contains(ConditionFlags::STAGED) {
        format.push_once(Marker::Staged);
        format.color = ColorId::Magenta;
    }
    if flags.contains(ConditionFlags::CONFLICT) {
        format.push_once(Marker::DeletedOrConflict);
        format.color = ColorId::Red;
    }

    format
}

/// Dimmed label shown before a detached reference.
pub fn detached_label() -> String {
    ColorId::Dim.wrap("DETACHED:")
}

/// `[DETACHED:]<color><reference><markers><reset>`
pub fn render(status: &RepositoryStatus) -> String {
    let format = format(status);
    let prefix = if status.is_detached() {
        detached_label()
    } else {
        String::new()
    };
    format!(
        "{prefix}{}{}{}{}",
        format.color.ansi(),
        status.reference(),
        format.symbols(),
        ColorId::Reset.ansi()
    )
}
