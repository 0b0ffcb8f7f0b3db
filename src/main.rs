#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use tr_coder::app::StartOptions;
use tr_coder::cli::{Cli, Commands};
use tr_coder::utils::style;
use tr_coder::{commands, logging};

fn run(cli: &Cli) -> Result<()> {
    let options = StartOptions::from(cli);

    match &cli.command {
        None => commands::run::execute(&options)?,
        Some(Commands::Config { command }) => commands::config::execute(command, &options)?,
        Some(Commands::Agents { command }) => commands::agents::execute(command, &options)?,
        Some(Commands::Models { command }) => commands::models::execute(command, &options)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}", style::warning(format!("Logging disabled: {}", e)));
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style::error(format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}
