//! # zengl Deposition Discard Command
//!
//! File: cli/src/commands/deposition/discard.rs
//! Author: Christi Mahu
//!
//! `zengl deposition discard <id>` deletes a draft deposition. Zenodo answers
//! 204 on success; any other status is reported together with the body.
//!
use super::ConnectionArgs;
use crate::core::error::Result;
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct DiscardArgs {
    /// Deposition id.
    pub id: u64,
}

/// # Handle Discard Command (`handle_discard`)
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` when Zenodo answers 2xx.
/// * `Err`: `ZenglError::Api` with the status and body otherwise (404 unknown
///   id, 403 already published).
pub async fn handle_discard(args: DiscardArgs, connection: &ConnectionArgs) -> Result<()> {
    let (_, bridge) = connection.bridge()?;
    let response = bridge
        .discard_deposition(args.id)
        .await?
        .error_for_status(&format!("Failed to discard deposition {}", args.id))?;
    debug!("Discard answered {}", response.status);
    println!("Discarded deposition {}", args.id);
    Ok(())
}
