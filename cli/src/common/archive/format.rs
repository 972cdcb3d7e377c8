//! # zengl Archive Formats (`common::archive::format`)
//!
//! File: cli/src/common/archive/format.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! GitLab offers every release's source code in four compression formats. This
//! module models them as a closed enum with a fixed token table, the tokens
//! being exactly what GitLab reports in a release's `assets.sources[].format`.
//!
//! Tokens round-trip through `Display`/`FromStr` and through serde, so the same
//! type is used for CLI flags, config files and API payloads.
//!
use crate::core::error::ZenglError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source archive formats GitLab attaches to a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArchiveFormat {
    #[default]
    Zip,
    Tar,
    TarGz,
    TarBz2,
}

impl ArchiveFormat {
    /// Every supported format, in GitLab's listing order.
    pub const ALL: [ArchiveFormat; 4] = [
        ArchiveFormat::Zip,
        ArchiveFormat::TarGz,
        ArchiveFormat::TarBz2,
        ArchiveFormat::Tar,
    ];

    /// The wire token GitLab uses for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::TarBz2 => "tar.bz2",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveFormat {
    type Err = ZenglError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArchiveFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ZenglError::InvalidArchiveFormat(s.to_string()))
    }
}

impl TryFrom<String> for ArchiveFormat {
    type Error = ZenglError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArchiveFormat> for String {
    fn from(format: ArchiveFormat) -> Self {
        format.as_str().to_string()
    }
}
