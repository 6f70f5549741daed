use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use promptline::config::{PromptConfig, set_config_path};
use promptline::prompt::Segment;
use promptline::styling::{ERROR, eprintln};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = cli.config {
        set_config_path(path);
    }
    let config = PromptConfig::load().context("Failed to load config")?;
    cli.color.unwrap_or(config.color).apply();

    match cli.command.unwrap_or(Commands::Prompt) {
        Commands::Prompt => commands::prompt(&config),
        Commands::Branch => commands::segment(&config, Segment::Branch),
        Commands::Venv => commands::segment(&config, Segment::Venv),
        Commands::Path => commands::segment(&config, Segment::Path),
        Commands::Parse => commands::parse(),
        Commands::Explain => commands::explain(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{ERROR}promptline: {e:#}{ERROR:#}");
        process::exit(1);
    }
}
