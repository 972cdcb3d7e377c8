//! # Zenodo API Models (`common::zenodo::models`)
//!
//! File: cli/src/common/zenodo/models.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! - `Deposition`: the record Zenodo returns from the deposition endpoints.
//!   Only the fields zengl reads are typed; the metadata Zenodo echoes back is
//!   kept as raw JSON so nothing is lost when printing it.
//! - `DepositionMetadata`: what zengl sends when creating a deposition. It can
//!   be loaded from a JSON or TOML file, either bare or wrapped in a top-level
//!   `metadata` key (the shape of the request body itself).
//!
use crate::core::error::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A Zenodo deposition record.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Deposition {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// `unsubmitted`, `inprogress` or `done`.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub links: DepositionLinks,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl Deposition {
    /// The DOI, ignoring the empty string Zenodo reports for drafts.
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref().filter(|doi| !doi.is_empty())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct DepositionLinks {
    /// File storage endpoint; uploads go to `{bucket}/{filename}`.
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// Descriptive metadata of a deposition.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DepositionMetadata {
    #[serde(default = "default_upload_type")]
    pub upload_type: String,
    pub title: String,
    #[serde(default)]
    pub creators: Vec<Creator>,
    /// HTML is accepted by Zenodo.
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_right: Option<String>,
    /// Identifier from Zenodo's license vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<NaiveDate>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Creator {
    /// "Family name, Given names".
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

fn default_upload_type() -> String {
    "software".to_string()
}

/// Accepts both `{"metadata": {...}}` and the bare metadata object.
#[derive(Deserialize)]
#[serde(untagged)]
enum MetadataDocument {
    Wrapped { metadata: DepositionMetadata },
    Bare(DepositionMetadata),
}

impl From<MetadataDocument> for DepositionMetadata {
    fn from(document: MetadataDocument) -> Self {
        match document {
            MetadataDocument::Wrapped { metadata } => metadata,
            MetadataDocument::Bare(metadata) => metadata,
        }
    }
}

impl DepositionMetadata {
    /// Minimal metadata: a titled software upload with no creators.
    #[cfg(test)]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            upload_type: default_upload_type(),
            title: title.into(),
            creators: Vec::new(),
            description: String::new(),
            access_right: None,
            license: None,
            keywords: Vec::new(),
            notes: None,
            version: None,
            publication_date: None,
        }
    }

    /// Loads metadata from a `.json` file, or from TOML for any other extension.
    ///
    /// Both the wrapped form (`{"metadata": {...}}` / a `[metadata]` table)
    /// and the bare metadata object are accepted.
    ///
    /// # Arguments
    ///
    /// * `path` - The metadata file.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the file cannot be read, does not parse, lacks a
    /// `title`, or contains fields Zenodo metadata does not have.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metadata file: {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let document: MetadataDocument = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON metadata: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML metadata: {}", path.display()))?
        };
        Ok(document.into())
    }
}
