//! # zengl GitLab Module (`common::gitlab`)
//!
//! File: cli/src/common/gitlab/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything zengl needs from the hosting platform side:
//!
//! - **`client`**: `GitLabClient`, a thin REST v4 client for tags and releases.
//! - **`models`**: `Tag`, `Release` and `SourceAsset`, the payloads those calls return.
//!

pub mod client;
pub mod models;
