//! # zengl Deposit Command
//!
//! File: cli/src/commands/deposit.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `zengl deposit`, the end-to-end workflow: tag a ref on GitLab,
//! create its release, and archive the release's source code into a new
//! Zenodo deposition. Optionally publishes the deposition right away.
//!
//! ## Examples
//!
//! ```bash
//! # Draft deposition from the 1.0 tag of master, metadata from a file
//! zengl --sandbox deposit my-group/my-project 1.0 --ref master --metadata zenodo.json
//!
//! # Same, tarball instead of zip, published immediately
//! zengl deposit 1234 v2.0 --ref main --format tar.gz --publish
//! ```
//!
//! When a step after the deposition was created fails, the id of the draft
//! is not known to the caller; `zengl deposition list` shows it and
//! `zengl deposition discard <id>` removes it.
//!
use super::ConnectionArgs;
use crate::common::archive::format::ArchiveFormat;
use crate::common::zenodo::models::DepositionMetadata;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `zengl deposit`.
#[derive(Parser, Debug)]
pub struct DepositArgs {
    /// GitLab project id or full path (e.g. `my-group/my-project`).
    pub project: String,

    /// Name of the tag (and release) to create.
    pub tag: String,

    /// Branch name or commit SHA to tag.
    #[arg(long = "ref", value_name = "REF")]
    pub git_ref: String,

    /// Release description attached to the tag.
    #[arg(long, short, default_value = "")]
    pub description: String,

    /// Deposition metadata file (JSON, or TOML for any other extension).
    #[arg(long, short)]
    pub metadata: Option<PathBuf>,

    /// Archive format to deposit; defaults to the configured format (zip).
    #[arg(long, short)]
    pub format: Option<ArchiveFormat>,

    /// Keep the downloaded archive after uploading it.
    #[arg(long)]
    pub keep_archive: bool,

    /// Publish the deposition once the archive is uploaded. Irreversible.
    #[arg(long)]
    pub publish: bool,
}

/// # Handle Deposit Command (`handle_deposit`)
///
/// Runs the release-to-deposition workflow for one tag.
///
/// ## Process
///
/// 1.  Loads the `--metadata` file, if any, before touching the network.
/// 2.  Builds the bridge from configuration plus connection flags.
/// 3.  Applies `--format` over the configured format, and `--keep-archive`
///     over the configured cleanup.
/// 4.  Calls `ZenodoGitLab::create_deposit_for` and prints the new id.
/// 5.  With `--publish`, publishes the draft and prints its DOI.
///
/// ## Arguments
///
/// * `args`: The parsed `DepositArgs`.
/// * `connection`: Global connection flags (tokens, URLs, sandbox, config file).
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` once the archive is deposited (and published if asked).
/// * `Err`: Metadata, configuration, GitLab or Zenodo failures. A draft created
///   before the failure is left in place.
pub async fn handle_deposit(args: DepositArgs, connection: &ConnectionArgs) -> Result<()> {
    info!("Handling deposit command for {} @ {}", args.project, args.tag);

    let metadata = args
        .metadata
        .as_deref()
        .map(DepositionMetadata::load)
        .transpose()?;

    let (cfg, bridge) = connection.bridge()?;
    let bridge = bridge
        .with_archive_format(args.format.unwrap_or(cfg.archive.format))
        .with_cleanup(cfg.archive.cleanup_enabled() && !args.keep_archive);
    info!("Depositing into {}", bridge.base_url());

    let deposition_id = bridge
        .create_deposit_for(
            &args.project,
            &args.tag,
            &args.git_ref,
            &args.description,
            metadata.as_ref(),
        )
        .await?;
    println!("Created deposition {}", deposition_id);

    if args.publish {
        let published = bridge.publish_deposition(deposition_id).await?;
        match published.doi() {
            Some(doi) => println!("Published deposition {} with DOI {}", deposition_id, doi),
            None => println!("Published deposition {}", deposition_id),
        }
    }

    Ok(())
}
