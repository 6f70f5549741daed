//! Subcommand handlers.

use std::io::Read;

use anyhow::{Context, Result};
use promptline::config::PromptConfig;
use promptline::env::ProcessEnv;
use promptline::git::{self, ConditionFlags, RepositoryStatus, format};
use promptline::prompt::{PromptContext, Segment};
use promptline::shell_exec::SystemRunner;
use promptline::styling::print;

fn context(config: &PromptConfig) -> Result<PromptContext<'_>> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Ok(PromptContext {
        config,
        env: &ProcessEnv,
        runner: &SystemRunner,
        cwd,
    })
}

/// Print the whole prompt line.
pub fn prompt(config: &PromptConfig) -> Result<()> {
    print!("{}", context(config)?.render());
    Ok(())
}

/// Print one segment, or nothing when it has nothing to show.
pub fn segment(config: &PromptConfig, segment: Segment) -> Result<()> {
    if let Some(rendered) = context(config)?.render_segment(segment) {
        print!("{rendered}");
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read status text from stdin")?;
    Ok(input)
}

/// Render status text from stdin the same way the branch segment does.
pub fn parse() -> Result<()> {
    match git::status::parse(&read_stdin()?) {
        Ok(status) => print!("{}", format::render(&status)),
        Err(e) => log::debug!("No branch state: {e}"),
    }
    Ok(())
}

/// Describe what the parser recognized in status text from stdin.
pub fn explain() -> Result<()> {
    print!("{}", describe(git::status::parse(&read_stdin()?)));
    Ok(())
}

fn flag_names(flags: ConditionFlags) -> String {
    if flags.is_empty() {
        return "(none)".to_string();
    }
    flags
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn describe(parsed: Result<RepositoryStatus, git::ParseFailure>) -> String {
    match parsed {
        Ok(status) => {
            let display = format::format(&status);
            let markers = match display.symbols() {
                symbols if symbols.is_empty() => "(none)".to_string(),
                symbols => symbols,
            };
            format!(
                "reference: {}\nflags: {}\nmarkers: {}\ncolor: {}\n",
                status.reference(),
                flag_names(status.flags()),
                markers,
                display.color
            )
        }
        Err(e) => format!("flags: {}\nreason: {}\n", flag_names(e.flags()), e),
    }
}
