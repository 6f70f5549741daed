//! Status parse failures.
//!
//! Both variants mean the same thing to the prompt: no branch state is
//! available and the segment is left out. They are kept apart so debug
//! logs say which one happened.

use std::fmt;

use super::status::ConditionFlags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// A line started with `fatal`: not a repository, or git itself failed.
    FatalStatus { line: String },
    /// Input ended without an `On branch` or `HEAD detached at` line.
    NoReferenceFound,
}

impl ParseFailure {
    /// Flag view of a failure, for callers that report conditions uniformly.
    pub fn flags(&self) -> ConditionFlags {
        ConditionFlags::FATAL
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::FatalStatus { line } => write!(f, "git reported a fatal error: {line}"),
            ParseFailure::NoReferenceFound => {
                write!(f, "no branch or detached HEAD line in git status output")
            }
        }
    }
}

impl std::error::Error for ParseFailure {}
