//! # GitLab REST Client (`common::gitlab::client`)
//!
//! File: cli/src/common/gitlab/client.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A minimal GitLab REST v4 client covering the three calls the release
//! workflow needs:
//! - create a tag at a ref
//! - attach a release (with description) to that tag
//! - list a project's releases, most recent first
//!
//! Authentication uses the `PRIVATE-TOKEN` header. Projects are addressed by
//! numeric id or by their `namespace/name` path, which is URL-encoded here.
//!
//! Unlike the Zenodo operations these calls interpret the status: the workflow
//! has no use for a failed tag, so anything other than 2xx becomes a
//! `ZenglError::Api` carrying status and body.
//!
use super::models::{Release, Tag};
use crate::common::network::http::{self, ApiResponse};
use crate::core::error::{Result, ZenglError};
use anyhow::Context;
use serde_json::json;
use tracing::{debug, info};

/// Default GitLab instance.
pub const GITLAB_URL: &str = "https://gitlab.com";

/// Handle to one GitLab instance.
#[derive(Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl GitLabClient {
    /// Creates a client for the instance at `base_url`. Without a token only
    /// public read calls succeed.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        Ok(Self {
            http: http::build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Root of the GitLab instance, without a trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates tag `tag_name` pointing at `git_ref` (branch name or commit SHA).
    ///
    /// # Arguments
    ///
    /// * `project` - Numeric id or `namespace/name` path.
    /// * `tag_name` - Name of the new tag.
    /// * `git_ref` - Branch name or commit SHA to tag.
    ///
    /// # Returns
    ///
    /// * `Result<Tag>` - The created tag as GitLab reports it.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - Non-2xx answer, e.g. 400 when the tag already
    ///   exists or 401 without a token allowed to write.
    pub async fn create_tag(&self, project: &str, tag_name: &str, git_ref: &str) -> Result<Tag> {
        info!("Creating tag '{}' at '{}' on project {}", tag_name, git_ref, project);
        let url = format!("{}/repository/tags", self.project_url(project));
        let request = self
            .http
            .post(&url)
            .json(&json!({ "tag_name": tag_name, "ref": git_ref }));
        self.send(request)
            .await?
            .into_json(&format!("Failed to create tag '{}' on project {}", tag_name, project))
    }

    /// Creates the release for an existing tag, carrying `description`.
    ///
    /// GitLab attaches the generated source archives (zip, tar.gz, tar.bz2,
    /// tar) to the release it creates.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - Non-2xx answer, e.g. 409 when the tag already has
    ///   a release.
    pub async fn set_release_description(
        &self,
        project: &str,
        tag_name: &str,
        description: &str,
    ) -> Result<Release> {
        info!("Creating release for tag '{}' on project {}", tag_name, project);
        let url = format!("{}/releases", self.project_url(project));
        let request = self
            .http
            .post(&url)
            .json(&json!({ "tag_name": tag_name, "description": description }));
        self.send(request).await?.into_json(&format!(
            "Failed to create release for tag '{}' on project {}",
            tag_name, project
        ))
    }

    /// Lists the project's releases as GitLab orders them (`released_at`, newest first).
    ///
    /// Only the first page is read.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - Non-2xx answer (404 for an unknown or hidden project).
    pub async fn list_releases(&self, project: &str) -> Result<Vec<Release>> {
        let url = format!("{}/releases", self.project_url(project));
        self.send(self.http.get(&url))
            .await?
            .into_json(&format!("Failed to list releases of project {}", project))
    }

    /// The first release of `list_releases`.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - If listing fails, or (without a status) when the
    ///   project has no releases at all.
    pub async fn latest_release(&self, project: &str) -> Result<Release> {
        let release = self
            .list_releases(project)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ZenglError::Api {
                message: format!("Project {} has no releases", project),
                status: None,
                body: None,
            })?;
        debug!("Most recent release of {} is '{}'", project, release.tag_name);
        Ok(release)
    }

    fn project_url(&self, project: &str) -> String {
        format!("{}/api/v4/projects/{}", self.base_url, encode_project(project))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let request = match &self.token {
            Some(token) => request.header("PRIVATE-TOKEN", token),
            None => request,
        };
        let response = request
            .send()
            .await
            .context("GitLab request failed")?;
        debug!("GitLab responded {} for {}", response.status(), response.url());
        ApiResponse::read(response).await
    }
}

/// GitLab accepts either a numeric id or the URL-encoded full path.
fn encode_project(project: &str) -> String {
    project.trim_matches('/').replace('/', "%2F")
}
