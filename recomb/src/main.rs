mod args;
mod commands;
mod util;

use args::{Cli, SubCommands};
use commands::{align, score};

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    color_backtrace::install();

    let log_level = std::env::var("RECOMB_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        SubCommands::Align(args) => align(&args)?,
        SubCommands::Score(args) => score(&args)?,
    }
    Ok(())
}
