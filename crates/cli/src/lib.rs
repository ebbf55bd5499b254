pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "revalue",
    about = "Revalue resale estimation CLI",
    long_about = "Estimate used-device resale prices, inspect the text extractor, and review effective configuration.",
    after_help = "Examples:\n  revalue estimate --text \"iPhone 13 Pro 256GB excellent condition\"\n  revalue estimate --device-type laptop --brand Dell --condition good --json\n  revalue extract --text \"samsung galaxy s21 128gb\" --json\n  revalue config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Run the full estimation pipeline for a description or structured fields"
    )]
    Estimate(commands::estimate::EstimateArgs),
    #[command(about = "Extract structured device attributes from free text")]
    Extract(commands::extract::ExtractArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Estimate(args) => commands::estimate::run(args),
        Command::Extract(args) => commands::extract::run(args),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }

    ExitCode::from(result.exit_code)
}
