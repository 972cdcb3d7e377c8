//! # zengl Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared building blocks used by the commands and by `core::bridge`:
//!
//! - **`archive`**: archive formats, picking a release's source asset, download and bucket upload.
//! - **`fs`**: small filesystem helpers (ensure directory, write/read/remove files).
//! - **`gitlab`**: GitLab REST client (tags, releases) and its models.
//! - **`network`**: the shared HTTP client and the raw `ApiResponse`.
//! - **`zenodo`**: Zenodo deposition calls and models.
//!
//! ```rust
//! use crate::common::{archive, gitlab, zenodo};
//! ```
//!

/// Archive formats and archive transfer (download, bucket upload).
pub mod archive;
/// Filesystem helpers.
pub mod fs;
/// GitLab tags and releases.
pub mod gitlab;
/// HTTP client construction and raw responses.
pub mod network;
/// Zenodo depositions.
pub mod zenodo;
