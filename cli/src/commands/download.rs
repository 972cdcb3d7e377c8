//! # zengl Download Command
//!
//! File: cli/src/commands/download.rs
//! Author: Christi Mahu
//!
//! Implements `zengl download <url> [--output FILE]`: fetches one archive to
//! disk, named after the last URL segment unless `--output` is given. Needs no
//! tokens and reads no configuration.
//!
use crate::common::archive::transfer;
use crate::common::network::http;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct DownloadArgs {
    /// Archive URL, e.g. a release's source asset.
    pub url: String,

    /// Output file (default: last segment of the URL, in the current directory).
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// # Handle Download Command (`handle_download`)
///
/// ## Arguments
///
/// * `args`: The parsed `DownloadArgs` (URL and optional output path).
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after printing the path written.
/// * `Err`: If the request fails, the server answers non-2xx (nothing is
///   written), or the file cannot be written.
pub async fn handle_download(args: DownloadArgs) -> Result<()> {
    info!("Handling download command for {}", args.url);
    let client = http::build_client()?;
    let written = transfer::download_archive(&client, &args.url, args.output.as_deref()).await?;
    println!("Saved {}", written.display());
    Ok(())
}
