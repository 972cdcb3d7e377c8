//! # zengl Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! HTTP plumbing shared by the GitLab and Zenodo clients.
//!
//! - **`http`**: client construction and the `ApiResponse` type that every
//!   low-level call returns.
//!

pub mod http;
