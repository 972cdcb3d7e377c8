//! # zengl Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types shared by the whole application. Two
//! layers are used, the same way throughout the crate:
//! - `ZenglError`: a `thiserror` enum for the conditions a caller may want to
//!   match on (a missing archive format, a failed API call, bad configuration,
//!   an unusable local path).
//! - `Result<T>`: an alias for `anyhow::Result<T>`, so transport, filesystem and
//!   JSON errors can travel with added context without being translated.
//!
//! ## Examples
//!
//! ```rust
//! // Raise a domain error
//! return Err(ZenglError::NoSuchSourceArchive { format: ArchiveFormat::Zip })?;
//!
//! // Pattern matching on a domain error carried by anyhow
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<ZenglError>(), Some(ZenglError::NoSuchSourceArchive { .. })) => {
//!         println!("Release has no archive in that format");
//!     }
//!     other => other?,
//! }
//! ```
//!
use crate::common::archive::format::ArchiveFormat;
use thiserror::Error;

/// Custom error type for the zengl application.
#[derive(Error, Debug)]
pub enum ZenglError {
    /// A format token from outside the program (CLI flag, config file) is not
    /// one of the archive formats GitLab offers.
    #[error("Invalid archive format '{0}'. Expected one of: zip, tar, tar.gz, tar.bz2.")]
    InvalidArchiveFormat(String),

    /// The release exists but lists no source archive of the requested format.
    #[error("No archive in the release of {format} format")]
    NoSuchSourceArchive { format: ArchiveFormat },

    /// A remote call failed. Carries the HTTP status and body when a response
    /// was received.
    #[error("{}", display_api_error(.message, .status))]
    Api {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    /// A local path is not what the operation needs (e.g. a file where a
    /// directory is expected).
    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

impl ZenglError {
    /// Builds an `Api` error from a received response.
    pub fn api(message: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        ZenglError::Api {
            message: message.into(),
            status: Some(status),
            body: Some(body.into()),
        }
    }

    /// HTTP status attached to the error, if any.
    pub fn response_code(&self) -> Option<u16> {
        match self {
            ZenglError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

fn display_api_error(message: &str, status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("{}: {}", code, message),
        None => message.to_string(),
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
