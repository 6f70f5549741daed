use std::path::PathBuf;

use clap::{Parser, Subcommand};
use promptline::styling::ColorMode;

#[derive(Parser)]
#[command(name = "promptline")]
#[command(version, about = "Compact, colorized shell prompt segments", long_about = None)]
#[command(after_long_help = r#"## Shell setup

bash:  PS1='$(promptline)\n\$ '
zsh:   setopt PROMPT_SUBST; PROMPT='$(promptline)'$'\n''%# '

## Branch markers

- `*` unstaged changes
- `!` deleted files or unmerged paths
- `?` untracked files
- `+` staged changes

The branch is green when clean, yellow with working tree changes, magenta
with staged changes and red with conflicts.
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ~/.config/promptline/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// When to emit color escapes (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,

    /// Log commands and decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full prompt line (the default)
    Prompt,

    /// Git branch segment only
    Branch,

    /// Virtual environment segment only
    Venv,

    /// `user@host:cwd` segment only
    Path,

    /// Render `git status` output read from stdin
    Parse,

    /// Show what was recognized in `git status` output read from stdin
    Explain,
}
