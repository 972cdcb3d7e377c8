//! # GitLab API Models (`common::gitlab::models`)
//!
//! File: cli/src/common/gitlab/models.rs
//! Author: Christi Mahu
//!
//! Subsets of the GitLab REST v4 tag and release payloads. Only the fields
//! zengl reads are modelled; everything else in the responses is ignored.
//!
use serde::{Deserialize, Serialize};

/// A repository tag as returned by `POST /projects/:id/repository/tags`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

/// A project release with its downloadable source archives.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub assets: ReleaseAssets,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ReleaseAssets {
    #[serde(default)]
    pub sources: Vec<SourceAsset>,
}

/// One auto-generated source archive of a release. `format` is kept as the raw
/// token so formats GitLab adds later do not break deserialization.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceAsset {
    pub format: String,
    pub url: String,
}
