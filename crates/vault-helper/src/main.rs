//! vault-helper CLI
//!
//! Fetches secrets from Vault and emits them on stdout, or renders them into
//! template placeholders in a text file in place.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    // The library returns typed results; this is the only place a failure
    // becomes a process exit.
    match cli.command {
        Commands::Token(ref cmd) => commands::token::run(cmd, &cli).await,
        Commands::Secret(ref cmd) => commands::secret::run(cmd, &cli).await,
        Commands::Parse(ref args) => commands::parse::run(args, &cli).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
