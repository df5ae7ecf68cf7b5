//! c20 CLI - on-demand content server.
//!
//! Provides commands for:
//! - `serve`: Start the content server
//! - `build`: Render the whole site into the output directory

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ServeArgs};
use output::Output;

/// c20 - on-demand content server.
#[derive(Parser)]
#[command(name = "c20", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the content server.
    Serve(ServeArgs),
    /// Build the static site.
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Serve(args) => args.verbose,
        Commands::Build(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = tokio::runtime::Runtime::new()
        .map_err(error::CliError::from)
        .and_then(|rt| match cli.command {
            Commands::Serve(args) => rt.block_on(args.execute()),
            Commands::Build(args) => rt.block_on(args.execute()),
        });

    if let Err(err) = result {
        output.failed(&err);
        std::process::exit(1);
    }
}
