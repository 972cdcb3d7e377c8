//! # zengl Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Filesystem helpers for the local archive copy. Import the submodule
//! directly, e.g. `crate::common::fs::io::write_bytes_to_file`.
//!
//! - **`io`**: directory creation and whole-file write/read/remove with error context.
//!

pub mod io;
