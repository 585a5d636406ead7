//! scriptgate CLI - decides which install-time build steps packages run

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("scriptgate=debug")
    } else {
        EnvFilter::new("scriptgate=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let output = cli.output();

    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args, output),
        Commands::Check(args) => commands::check::execute(args, output),
    }
}
