//! # zengl Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Foundational pieces used by every command:
//! - `bridge`: `ZenodoGitLab`, the GitLab → Zenodo workflow and deposition lifecycle
//! - `config`: configuration loading, merging, and validation
//! - `error`: error types and the crate-wide `Result`
//!
//! ```rust
//! use crate::core::bridge::ZenodoGitLab;
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, ZenglError}; // For error handling
//! ```
//!
pub mod bridge;
pub mod config;
pub mod error;
