//! # zengl Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Entry point of the zengl CLI, which archives GitLab releases on Zenodo.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Tag master as 1.0 and archive the release on the Zenodo sandbox
//! zengl --sandbox deposit my-group/my-project 1.0 --ref master
//!
//! # Inspect what was created, with debug logging
//! zengl -vv deposition list
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler
//! 4. Print any error and exit with status 1
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (deposit, deposition, download)
mod common; // GitLab/Zenodo clients, archives, HTTP and filesystem helpers
mod core; // Bridge, configuration, errors

#[cfg(test)]
mod test_support;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "zengl",
    about = "Archive GitLab releases as Zenodo depositions",
    long_about = "Tags a GitLab project, creates the release, and uploads its source archive\n\
                  to a new Zenodo deposition. Also inspects, publishes and discards depositions.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    connection: commands::ConnectionArgs,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Tag, release and archive a project on Zenodo.
    #[command(alias = "d")]
    Deposit(commands::deposit::DepositArgs),
    /// Show, list, publish or discard depositions.
    Deposition(commands::deposition::DepositionArgs),
    /// Download one archive URL.
    Download(commands::download::DownloadArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Deposit(args) => commands::deposit::handle_deposit(args, &cli.connection).await,
        Commands::Deposition(args) => {
            commands::deposition::handle_deposition(args, &cli.connection).await
        }
        Commands::Download(args) => commands::download::handle_download(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
