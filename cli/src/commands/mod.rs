//! # zengl Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the zengl CLI and the
//! connection flags they share.
//!
//! ## Command Groups
//!
//! - `deposit`: archive a GitLab release into a new Zenodo deposition
//! - `deposition`: inspect, list, publish or discard depositions
//! - `download`: fetch a single archive URL to disk
//!
//! ## Connection Flags
//!
//! `ConnectionArgs` is flattened into the top-level CLI with `global = true`,
//! so `--zenodo-token`, `--sandbox` and friends work before or after the
//! subcommand. Each flag also reads an environment variable. Values given
//! here override the configuration files (see `core::config`).
//!

/// Archive a release: `zengl deposit <project> <tag> --ref <ref>`.
pub mod deposit;
/// Deposition lifecycle: `show`, `list`, `publish`, `discard`.
pub mod deposition;
/// Plain archive download: `zengl download <url>`.
pub mod download;

use crate::core::bridge::ZenodoGitLab;
use crate::core::config::{self, Config};
use crate::core::error::Result;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

/// Connection settings shared by every command.
#[derive(Args, Default)]
pub struct ConnectionArgs {
    /// Configuration file to use instead of the user/project files.
    #[arg(long, global = true, env = "ZENGL_CONFIG")]
    pub config: Option<PathBuf>,

    /// GitLab instance URL.
    #[arg(long, global = true, env = "GITLAB_URL")]
    pub gitlab_url: Option<String>,

    /// GitLab access token (api scope).
    #[arg(long, global = true, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub gitlab_token: Option<String>,

    /// Zenodo access token (deposit:write and deposit:actions scopes).
    #[arg(long, global = true, env = "ZENODO_TOKEN", hide_env_values = true)]
    pub zenodo_token: Option<String>,

    /// Use sandbox.zenodo.org instead of zenodo.org.
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// Explicit Zenodo API root, overriding --sandbox.
    #[arg(long, global = true, env = "ZENODO_URL")]
    pub zenodo_url: Option<String>,
}

// Tokens stay out of `-vv` argument dumps.
impl std::fmt::Debug for ConnectionArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionArgs")
            .field("config", &self.config)
            .field("gitlab_url", &self.gitlab_url)
            .field("gitlab_token", &self.gitlab_token.as_ref().map(|_| "***"))
            .field("zenodo_token", &self.zenodo_token.as_ref().map(|_| "***"))
            .field("sandbox", &self.sandbox)
            .field("zenodo_url", &self.zenodo_url)
            .finish()
    }
}

impl ConnectionArgs {
    /// Loads configuration and applies these flags on top.
    pub fn load_config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => config::load_config_file(path)?,
            None => config::load_config().context("Failed to load zengl configuration")?,
        };
        self.apply_to(&mut cfg);
        config::validate_config(&cfg).context("Configuration validation failed")?;
        Ok(cfg)
    }

    fn apply_to(&self, cfg: &mut Config) {
        if let Some(url) = &self.gitlab_url {
            cfg.gitlab.url = url.clone();
        }
        if let Some(token) = &self.gitlab_token {
            cfg.gitlab.token = Some(token.clone());
        }
        if let Some(token) = &self.zenodo_token {
            cfg.zenodo.token = Some(token.clone());
        }
        if self.sandbox {
            cfg.zenodo.sandbox = Some(true);
        }
        if let Some(url) = &self.zenodo_url {
            cfg.zenodo.url = Some(url.clone());
        }
        debug!("Applied command-line connection overrides: {:?}", self);
    }

    /// Loads configuration and builds the GitLab/Zenodo bridge from it.
    pub fn bridge(&self) -> Result<(Config, ZenodoGitLab)> {
        let cfg = self.load_config()?;
        let bridge = ZenodoGitLab::from_config(&cfg)?;
        Ok((cfg, bridge))
    }
}
