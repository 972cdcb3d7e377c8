//! # zengl Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Release archives as zengl sees them: a format to pick, a URL to resolve,
//! bytes to download and upload.
//!
//! - **`format`**: `ArchiveFormat`, the closed set of source archive formats
//!   GitLab generates for a release and their wire tokens.
//! - **`transfer`**: URL resolution, filename derivation, download and bucket
//!   upload with cleanup of the local copy.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{format::ArchiveFormat, transfer};
//!
//! # async fn run(client: &reqwest::Client, release: &Release, token: &str, bucket: &str) -> anyhow::Result<()> {
//! let url = transfer::resolve_archive_url(release, ArchiveFormat::TarGz)?;
//! let path = transfer::download_archive(client, url, None).await?;
//! let response = transfer::upload_archive(client, token, &path, bucket, true).await?;
//! println!("Bucket answered {}", response.status);
//! # Ok(())
//! # }
//! ```
//!

pub mod format;
pub mod transfer;
