//! # zengl Zenodo Module (`common::zenodo`)
//!
//! File: cli/src/common/zenodo/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The archival service side of zengl:
//!
//! - **`deposition`**: the five deposition endpoints (create, fetch, list,
//!   publish, discard), one request each.
//! - **`models`**: `Deposition` records and the `DepositionMetadata` sent on create.
//!
//! Uploading an archive into a deposition's bucket lives with the other
//! archive transfers in `common::archive::transfer`.
//!

pub mod deposition;
pub mod models;

/// Production Zenodo.
pub const ZENODO_URL: &str = "https://zenodo.org";
/// Zenodo sandbox; needs its own access token.
pub const ZENODO_SANDBOX_URL: &str = "https://sandbox.zenodo.org";

/// Picks the production or sandbox root.
pub fn base_url(use_sandbox: bool) -> &'static str {
    if use_sandbox {
        ZENODO_SANDBOX_URL
    } else {
        ZENODO_URL
    }
}
