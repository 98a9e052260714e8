use std::process::ExitCode;

use alsp::{generate::AlpGenerator, resolution::Solve};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct AlpTools {
    /// Log solver progress at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a random single-runway instance as csv
    Generate(AlpGenerator),
    /// Run the baseline and the three metaheuristics on an instance
    Solve(Solve),
}

fn main() -> ExitCode {
    let cli = AlpTools::parse();
    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Command::Generate(generate) => generate.generate(),
        Command::Solve(solve) => solve.solve(),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
