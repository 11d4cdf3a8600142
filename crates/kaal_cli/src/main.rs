mod cli;
mod commands;
mod config;
mod logging;
mod render;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::KaalConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = KaalConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Balance(args) => commands::run_balance(&args),
        Command::Timeline(args) => commands::run_timeline(&args, &config),
        Command::Current(args) => commands::run_current(&args, &config),
    }
}
