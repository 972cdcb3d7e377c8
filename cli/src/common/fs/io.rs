//! # zengl Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` for the transient archive file that lives
//! between download and upload. Each wrapper adds the path to the error
//! context so a failed write, read or cleanup names the file involved.
//!
//! - **`ensure_dir_exists`**: creates a directory (and parents) unless it exists; fails if the path is a file.
//! - **`write_bytes_to_file`**: writes bytes, creating the parent directory first and overwriting any existing file.
//! - **`read_file_bytes`**: reads a whole file.
//! - **`remove_file`**: deletes a file.
//!
use crate::core::error::{Result, ZenglError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Creates missing parents as well. Calling it on an existing directory is a
/// no-op.
///
/// # Arguments
///
/// * `path` - The directory that must exist afterwards.
///
/// # Returns
///
/// * `Result<()>` - `Ok(())` once `path` is a directory.
///
/// # Errors
///
/// * `ZenglError::FileSystem` - If the path exists but is not a directory.
/// * An I/O error with context if creating it fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ZenglError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Writes `content` to `path`, replacing any existing file.
///
/// The parent directory is created first when missing.
///
/// # Arguments
///
/// * `path` - Destination file, e.g. the staged `project-1.0.zip`.
/// * `content` - Bytes to write.
///
/// # Errors
///
/// Returns an `Err` if the parent cannot be created or the write fails.
pub fn write_bytes_to_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file {:?}", path))?;
    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

/// Reads the whole file at `path` into memory.
///
/// # Errors
///
/// Returns an `Err` naming the path if it is missing or unreadable.
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Deletes the file at `path`.
///
/// # Errors
///
/// Returns an `Err` naming the path if it is missing or cannot be removed.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    debug!("Removed {:?}", path);
    Ok(())
}
