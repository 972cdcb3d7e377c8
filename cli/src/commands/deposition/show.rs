//! # zengl Deposition Show Command
//!
//! File: cli/src/commands/deposition/show.rs
//! Author: Christi Mahu
//!
//! `zengl deposition show <id>` prints the deposition record as pretty JSON.
//!
use super::ConnectionArgs;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Deposition id.
    pub id: u64,
}

pub async fn handle_show(args: ShowArgs, connection: &ConnectionArgs) -> Result<()> {
    let (_, bridge) = connection.bridge()?;
    let deposition = bridge.get_deposition_data(args.id).await?;
    let rendered =
        serde_json::to_string_pretty(&deposition).context("Failed to render deposition")?;
    println!("{}", rendered);
    Ok(())
}
