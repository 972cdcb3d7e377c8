//! # zengl Deposition Command Group
//!
//! File: cli/src/commands/deposition/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Entry point and router for `zengl deposition`. Each subcommand is one
//! deposition call made through `ZenodoGitLab`:
//!
//! ```bash
//! zengl deposition list
//! zengl deposition show 1234
//! zengl deposition publish 1234
//! zengl deposition discard 1234
//! ```
//!
//! Handlers live in their own files (`show.rs`, `list.rs`, `publish.rs`,
//! `discard.rs`); this module only parses and dispatches.
//!
use super::ConnectionArgs;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod discard;
mod list;
mod publish;
mod show;

/// # Deposition Command Group Arguments (`DepositionArgs`)
#[derive(Parser, Debug)]
pub struct DepositionArgs {
    #[command(subcommand)]
    command: DepositionCommand,
}

#[derive(Subcommand, Debug)]
enum DepositionCommand {
    /// Print one deposition as JSON.
    Show(show::ShowArgs),
    /// List the depositions of the token's user.
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// Publish a draft deposition (irreversible; mints the DOI).
    Publish(publish::PublishArgs),
    /// Delete a draft deposition.
    #[command(alias = "rm")]
    Discard(discard::DiscardArgs),
}

/// # Handle Deposition Command (`handle_deposition`)
///
/// Dispatches to the subcommand handler, passing along the shared connection
/// flags so each handler can build its own `ZenodoGitLab`.
pub async fn handle_deposition(args: DepositionArgs, connection: &ConnectionArgs) -> Result<()> {
    match args.command {
        DepositionCommand::Show(args) => show::handle_show(args, connection).await?,
        DepositionCommand::List(args) => list::handle_list(args, connection).await?,
        DepositionCommand::Publish(args) => publish::handle_publish(args, connection).await?,
        DepositionCommand::Discard(args) => discard::handle_discard(args, connection).await?,
    }
    Ok(())
}
