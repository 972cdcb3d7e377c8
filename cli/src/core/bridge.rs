//! # zengl GitLab → Zenodo Bridge
//!
//! File: cli/src/core/bridge.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `ZenodoGitLab` ties a GitLab instance to a Zenodo account. It holds the
//! GitLab client, the Zenodo token and the Zenodo API root (production,
//! sandbox or an explicit URL), all fixed once the value is built.
//!
//! ## Workflow
//!
//! `create_deposit_for` archives one release:
//! 1. Create a draft deposition (id + bucket URL).
//! 2. Tag `ref` on GitLab and attach the release description.
//! 3. Fetch the project's most recent release.
//! 4. Resolve the archive URL for the configured format.
//! 5. Download the archive, upload it to the bucket.
//! 6. Return the deposition id.
//!
//! Nothing is retried and nothing is rolled back. If a later step fails, the
//! draft deposition (and possibly the tag/release) stays behind; call
//! `discard_deposition` to remove the draft.
//!
//! The remaining methods bind the stored token and base URL into the single
//! deposition calls of `common::zenodo::deposition`.
//!
use crate::common::archive::format::ArchiveFormat;
use crate::common::archive::transfer;
use crate::common::gitlab::client::GitLabClient;
use crate::common::network::http::{self, ApiResponse};
use crate::common::zenodo::{
    self, deposition,
    models::{Deposition, DepositionMetadata},
};
use crate::core::config::Config;
use crate::core::error::{Result, ZenglError};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Connection to GitLab and Zenodo, plus how archives are staged locally.
pub struct ZenodoGitLab {
    gitlab: GitLabClient,
    http: reqwest::Client,
    zenodo_token: String,
    base_url: String,
    archive_format: ArchiveFormat,
    download_dir: PathBuf,
    cleanup: bool,
}

impl std::fmt::Debug for ZenodoGitLab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZenodoGitLab")
            .field("gitlab", &self.gitlab)
            .field("base_url", &self.base_url)
            .field("archive_format", &self.archive_format)
            .field("download_dir", &self.download_dir)
            .field("cleanup", &self.cleanup)
            .finish_non_exhaustive()
    }
}

impl ZenodoGitLab {
    /// Bridges `gitlab` to production Zenodo, or to the sandbox when
    /// `use_sandbox` is set (the token must then be a sandbox token).
    ///
    /// Archives default to zip, staged in the current directory and deleted
    /// after upload.
    ///
    /// # Arguments
    ///
    /// * `gitlab` - Client for the instance hosting the project.
    /// * `zenodo_token` - Zenodo access token (`deposit:write`, `deposit:actions`).
    /// * `use_sandbox` - Selects `https://sandbox.zenodo.org` over `https://zenodo.org`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the HTTP client cannot be built (TLS backend failure).
    pub fn new(gitlab: GitLabClient, zenodo_token: impl Into<String>, use_sandbox: bool) -> Result<Self> {
        Ok(Self {
            gitlab,
            http: http::build_client()?,
            zenodo_token: zenodo_token.into(),
            base_url: zenodo::base_url(use_sandbox).to_string(),
            archive_format: ArchiveFormat::default(),
            download_dir: PathBuf::from("."),
            cleanup: true,
        })
    }

    /// Builds the bridge from loaded configuration.
    ///
    /// Applies the configured GitLab URL and token, the Zenodo API root
    /// (explicit URL, sandbox or production), the archive format, the download
    /// directory and the cleanup flag.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Config` - If no Zenodo token is configured.
    /// * Any error from building the HTTP clients.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.zenodo.require_token()?;
        let gitlab = GitLabClient::new(&config.gitlab.url, config.gitlab.token.clone())?;
        Ok(Self::new(gitlab, token, config.zenodo.is_sandbox())?
            .with_base_url(config.zenodo.base_url())
            .with_archive_format(config.archive.format)
            .with_download_dir(&config.archive.download_dir)
            .with_cleanup(config.archive.cleanup_enabled()))
    }

    /// Replaces the Zenodo API root (a trailing `/` is dropped). Used for
    /// self-hosted instances.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Selects which of the release's source archives is deposited.
    pub fn with_archive_format(mut self, format: ArchiveFormat) -> Self {
        self.archive_format = format;
        self
    }

    /// Directory the archive is written to between download and upload. It
    /// is created on first use.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Keep (`false`) or delete (`true`, default) the local archive after upload.
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// The Zenodo API root every deposition call goes to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Archives release `tag_name` of `project` into a new deposition and
    /// returns the deposition id. See the module docs for the steps.
    ///
    /// # Arguments
    ///
    /// * `project` - GitLab project id or `namespace/name` path.
    /// * `tag_name` - Tag (and release) to create.
    /// * `git_ref` - Branch name or commit SHA the tag points at.
    /// * `release_description` - Text attached to the release.
    /// * `metadata` - Deposition metadata; `None` creates a blank draft.
    ///
    /// # Returns
    ///
    /// * `Result<u64>` - Id of the new draft deposition holding the archive.
    ///   A rejected upload (non-2xx from the bucket) is logged, not raised.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - If creating the deposition, the tag or the release,
    ///   listing releases, or downloading the archive is answered with a
    ///   non-2xx status. The status and body are kept.
    /// * `ZenglError::NoSuchSourceArchive` - If the newest release lists no
    ///   archive in the configured format.
    /// * Transport and filesystem errors, with context.
    ///
    /// Whatever was created before the failure stays in place.
    pub async fn create_deposit_for(
        &self,
        project: &str,
        tag_name: &str,
        git_ref: &str,
        release_description: &str,
        metadata: Option<&DepositionMetadata>,
    ) -> Result<u64> {
        let created: Deposition =
            deposition::create(&self.http, &self.zenodo_token, &self.base_url, metadata)
                .await?
                .into_json("Failed to create deposition")?;
        let bucket_url = created.links.bucket.clone().ok_or_else(|| ZenglError::Api {
            message: format!("Deposition {} has no bucket link", created.id),
            status: None,
            body: None,
        })?;
        info!("Created deposition {} (bucket {})", created.id, bucket_url);
        info!("Releasing {} on {}", project, self.gitlab.base_url());

        self.gitlab.create_tag(project, tag_name, git_ref).await?;
        self.gitlab
            .set_release_description(project, tag_name, release_description)
            .await?;

        // Relies on GitLab listing the release just created first.
        let latest = self.gitlab.latest_release(project).await?;
        if latest.tag_name != tag_name {
            warn!(
                "Most recent release of {} is '{}', not the new tag '{}'",
                project, latest.tag_name, tag_name
            );
        }

        let archive_url = transfer::resolve_archive_url(&latest, self.archive_format)?;
        let archive_path = self
            .download_dir
            .join(transfer::derive_filename_from_url(archive_url));
        debug!("Staging archive at {}", archive_path.display());

        transfer::download_archive(&self.http, archive_url, Some(&archive_path)).await?;
        let upload = transfer::upload_archive(
            &self.http,
            &self.zenodo_token,
            &archive_path,
            &bucket_url,
            self.cleanup,
        )
        .await?;
        if !upload.is_success() {
            warn!(
                "Upload into deposition {} answered {}: {}",
                created.id,
                upload.status,
                upload.text()
            );
        }

        Ok(created.id)
    }

    /// Fetches one deposition record.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - On a non-2xx answer (e.g. 404 for an unknown id).
    /// * Transport or JSON decoding errors.
    pub async fn get_deposition_data(&self, deposition_id: u64) -> Result<Deposition> {
        deposition::fetch(&self.http, &self.zenodo_token, &self.base_url, deposition_id)
            .await?
            .into_json(&format!("Failed to fetch deposition {}", deposition_id))
    }

    /// Publishes a draft and returns the published record, DOI included.
    ///
    /// Irreversible. A 404 (unknown id) or 400 (incomplete metadata) answer is
    /// raised as `ZenglError::Api` with the status and Zenodo's message body;
    /// use `zenodo::deposition::publish` for the raw response instead.
    pub async fn publish_deposition(&self, deposition_id: u64) -> Result<Deposition> {
        deposition::publish(&self.http, &self.zenodo_token, &self.base_url, deposition_id)
            .await?
            .into_json(&format!("Failed to publish deposition {}", deposition_id))
    }

    /// Lists the depositions of the token's user, drafts and published alike.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - On a non-2xx answer (401 for a bad token).
    pub async fn get_depositions(&self) -> Result<Vec<Deposition>> {
        deposition::list(&self.http, &self.zenodo_token, &self.base_url)
            .await?
            .into_json("Failed to list depositions")
    }

    /// Deletes a draft. Returns the raw response (204 on success) so the
    /// caller decides what a 404 or 403 means; only transport errors raise.
    pub async fn discard_deposition(&self, deposition_id: u64) -> Result<ApiResponse> {
        deposition::discard(&self.http, &self.zenodo_token, &self.base_url, deposition_id).await
    }
}
