//! DesignDNA command-line driver
//!
//! Runs the style synthesis pipeline over capture snapshots stored as JSON
//! and prints or writes the resulting style spec and token documents.

use anyhow::Result;
use clap::{Parser, Subcommand};
use designdna_logging::{init_logging, LogConfig};
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "designdna", version, about = "Extract design tokens from captured web pages")]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize a style spec and token document from a snapshot
    Synth(cli::synth::SynthArgs),

    /// Build a token document from an existing style spec
    Tokens(cli::tokens::TokensArgs),

    /// Build a token document from raw frequency counts
    Legacy(cli::legacy::LegacyArgs),

    /// Print the design prompt for a style spec or token document
    Prompt(cli::prompt::PromptArgs),

    /// Show resolved paths and effective pipeline settings
    Config(cli::config::ConfigArgs),
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Synth(args) => cli::synth::run(args),
        Commands::Tokens(args) => cli::tokens::run(args),
        Commands::Legacy(args) => cli::legacy::run(args),
        Commands::Prompt(args) => cli::prompt::run(args),
        Commands::Config(args) => cli::config::run(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(LogConfig { app_name: "designdna", verbose: cli.verbose }) {
        eprintln!("Warning: file logging disabled: {:#}", err);
    }

    match run_command(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<cli::error::HelpfulError>() {
                Some(helpful) => eprint!("{}", helpful),
                None => eprintln!("ERROR: {:#}", err),
            }
            ExitCode::from(1)
        }
    }
}
