pub mod config;
pub mod env;
pub mod git;
pub mod path;
pub mod prompt;
pub mod shell_exec;
pub mod styling;
pub mod venv;

// Re-export the status pipeline for convenience
pub use git::{ConditionFlags, ParseFailure, RepositoryStatus};
