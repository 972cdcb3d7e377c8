//! # zengl Deposition Publish Command
//!
//! File: cli/src/commands/deposition/publish.rs
//! Author: Christi Mahu
//!
//! `zengl deposition publish <id>` publishes a draft. Zenodo mints the DOI at
//! this point; a published record can no longer be deleted.
//!
use super::ConnectionArgs;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct PublishArgs {
    /// Deposition id.
    pub id: u64,
}

/// # Handle Publish Command (`handle_publish`)
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after printing the id and, when Zenodo reports
///   one, the DOI.
/// * `Err`: `ZenglError::Api` for a non-2xx answer, e.g. 404 for an unknown id
///   or 400 when the metadata is incomplete.
pub async fn handle_publish(args: PublishArgs, connection: &ConnectionArgs) -> Result<()> {
    let (_, bridge) = connection.bridge()?;
    let deposition = bridge.publish_deposition(args.id).await?;
    match deposition.doi() {
        Some(doi) => println!("Published deposition {} with DOI {}", deposition.id, doi),
        None => println!("Published deposition {}", deposition.id),
    }
    Ok(())
}
