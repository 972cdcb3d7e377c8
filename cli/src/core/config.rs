//! # zengl Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates zengl's configuration: where GitLab
//! lives, the tokens for GitLab and Zenodo, whether to use the Zenodo sandbox,
//! and how release archives are fetched.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and their environment variables (applied by the
//!    command layer on top of the loaded `Config`)
//! 2. Project-specific `.zengl.toml` in the current directory or ancestors
//!    (the search stops at the first directory containing `.git`)
//! 3. User-specific `<config dir>/zengl/config.toml`
//! 4. Default values defined in the code
//!
//! An explicit file (`--config`) replaces steps 2 and 3.
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! [gitlab]
//! url = "https://gitlab.example.org"
//! token = "glpat-..."
//!
//! [zenodo]
//! token = "..."
//! sandbox = true
//!
//! [archive]
//! format = "tar.gz"
//! download_dir = "~/.cache/zengl"
//! cleanup = true
//! ```
//!
use crate::common::archive::format::ArchiveFormat;
use crate::common::gitlab::client::GITLAB_URL;
use crate::common::zenodo;
use crate::core::error::{Result, ZenglError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub gitlab: GitLabConfig,
    #[serde(default)]
    pub zenodo: ZenodoConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Hosting platform connection.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GitLabConfig {
    #[serde(default = "default_gitlab_url")]
    pub url: String,
    /// Personal/project access token with `api` scope.
    #[serde(default)]
    pub token: Option<String>,
}

/// Archival service connection.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ZenodoConfig {
    /// Access token with `deposit:write` and `deposit:actions` scopes.
    #[serde(default)]
    pub token: Option<String>,
    /// Use sandbox.zenodo.org. The token must be a sandbox token.
    /// `None` when no layer set it; read through `is_sandbox`.
    #[serde(default)]
    pub sandbox: Option<bool>,
    /// Explicit API root (e.g. a self-hosted instance); wins over `sandbox`.
    #[serde(default)]
    pub url: Option<String>,
}

/// How release archives are fetched and staged locally.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub format: ArchiveFormat,
    /// Where the archive is written between download and upload (can use ~).
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
    /// Delete the local archive once the upload call returns.
    /// `None` when no layer set it; read through `cleanup_enabled`.
    #[serde(default)]
    pub cleanup: Option<bool>,
}

fn default_gitlab_url() -> String {
    GITLAB_URL.to_string()
}
fn default_download_dir() -> String {
    ".".to_string()
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: default_gitlab_url(),
            token: None,
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            format: ArchiveFormat::default(),
            download_dir: default_download_dir(),
            cleanup: None,
        }
    }
}

impl ArchiveConfig {
    /// Whether the local archive is deleted after upload (default: yes).
    pub fn cleanup_enabled(&self) -> bool {
        self.cleanup.unwrap_or(true)
    }
}

impl ZenodoConfig {
    /// Whether the sandbox was selected (default: production).
    pub fn is_sandbox(&self) -> bool {
        self.sandbox.unwrap_or(false)
    }

    /// The API root: explicit `url`, else sandbox or production.
    pub fn base_url(&self) -> String {
        match &self.url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => zenodo::base_url(self.is_sandbox()).to_string(),
        }
    }

    /// The access token, or a `Config` error explaining where to set it.
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                anyhow!(ZenglError::Config(
                    "No Zenodo access token configured. Pass --zenodo-token, set ZENODO_TOKEN, or add `token` under [zenodo] in the config file.".to_string()
                ))
            })
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".zengl.toml";

/// Loads configuration from the standard locations.
///
/// Reads the user file and the nearest project `.zengl.toml` (either may be
/// absent), merges them with project values winning, expands `~` and
/// validates the result.
///
/// # Returns
///
/// * `Result<Config>` - The merged configuration, defaults filled in.
///
/// # Errors
///
/// Returns an `Err` if a file exists but cannot be read or parsed (unknown
/// keys and unknown archive formats included), or if validation fails.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    finish(merge_configs(user_config.unwrap_or_default(), project_config))
}

/// Loads configuration from one explicit file, skipping discovery.
///
/// # Errors
///
/// Returns an `Err` if the file is missing, malformed or fails validation.
pub fn load_config_file(path: &Path) -> Result<Config> {
    info!("Loading configuration from: {}", path.display());
    finish(load_config_from_path(path)?)
}

fn finish(mut config: Config) -> Result<Config> {
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!(
        "Final loaded configuration: gitlab={} zenodo={} archive={:?}",
        config.gitlab.url,
        config.zenodo.base_url(),
        config.archive
    );
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("org", "zengl", "zengl") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.zengl.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the defaults. Optional
/// settings win whenever the project file sets them at all.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    Config {
        gitlab: GitLabConfig {
            url: if project.gitlab.url != defaults.gitlab.url {
                project.gitlab.url
            } else {
                user.gitlab.url
            },
            token: project.gitlab.token.or(user.gitlab.token),
        },
        zenodo: ZenodoConfig {
            token: project.zenodo.token.or(user.zenodo.token),
            sandbox: project.zenodo.sandbox.or(user.zenodo.sandbox),
            url: project.zenodo.url.or(user.zenodo.url),
        },
        archive: ArchiveConfig {
            format: if project.archive.format != defaults.archive.format {
                project.archive.format
            } else {
                user.archive.format
            },
            download_dir: if project.archive.download_dir != defaults.archive.download_dir {
                project.archive.download_dir
            } else {
                user.archive.download_dir
            },
            cleanup: project.archive.cleanup.or(user.archive.cleanup),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    config.archive.download_dir = shellexpand::tilde(&config.archive.download_dir).into_owned();
    debug!("Expanded download directory: {}", config.archive.download_dir);
}

/// Checks values serde cannot check.
///
/// # Errors
///
/// * `ZenglError::Config` - If a GitLab or Zenodo URL is not http(s), or the
///   download directory exists as a file.
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating configuration...");
    for (name, url) in [
        ("gitlab.url", Some(config.gitlab.url.as_str())),
        ("zenodo.url", config.zenodo.url.as_deref()),
    ] {
        if let Some(url) = url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!(ZenglError::Config(format!(
                    "Invalid {} '{}'. Expected an http:// or https:// URL.",
                    name, url
                ))));
            }
        }
    }
    let download_dir = PathBuf::from(&config.archive.download_dir);
    if download_dir.exists() && !download_dir.is_dir() {
        return Err(anyhow!(ZenglError::Config(format!(
            "Configured download directory '{}' exists but is not a directory.",
            download_dir.display()
        ))));
    }
    Ok(())
}
