//! # zengl HTTP Helpers (`common::network::http`)
//!
//! File: cli/src/common/network/http.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared plumbing for every remote call zengl makes:
//! - `build_client`: the one `reqwest::Client` configuration used for GitLab
//!   and Zenodo alike (user agent only; transport defaults otherwise).
//! - `ApiResponse`: the raw outcome of a call, status plus fully read body. Low
//!   level operations hand this back untouched so callers can inspect the
//!   status themselves; `into_json` is the strict path used when a record is
//!   expected.
//!
use crate::core::error::{Result, ZenglError};
use anyhow::Context;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("zengl/", env!("CARGO_PKG_VERSION"));

/// Creates the HTTP client shared by the GitLab and Zenodo calls.
///
/// The client identifies itself as `zengl/<version>` and otherwise keeps
/// reqwest's defaults: no request timeout, redirects followed, system TLS roots.
///
/// # Returns
///
/// * `Result<reqwest::Client>` - A client that can be cloned cheaply and reused.
///
/// # Errors
///
/// Returns an `Err` if the TLS backend cannot be initialised.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

/// Status and body of a completed HTTP call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status as received; never checked on construction.
    pub status: StatusCode,
    /// The full body, read eagerly so the connection can be reused.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Reads the whole body of `response`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the connection drops while the body is streamed.
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let url = response.url().clone();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;
        Ok(Self {
            status,
            body: body.to_vec(),
        })
    }

    /// Numeric status, e.g. `404`.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON without looking at the status.
    ///
    /// # Errors
    ///
    /// Returns an `Err` naming the status and echoing the body when it is not
    /// valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).with_context(|| {
            format!(
                "Failed to decode JSON response (status {}): {}",
                self.status,
                self.text()
            )
        })
    }

    /// Decodes the body as JSON, turning a non-success status into
    /// `ZenglError::Api` with `what` as the message.
    ///
    /// # Arguments
    ///
    /// * `what` - Describes the failed operation, e.g. `"Failed to fetch deposition 7"`.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - Non-2xx status; carries the status and body text.
    /// * A decoding error if the 2xx body does not match `T`.
    pub fn into_json<T: DeserializeOwned>(self, what: &str) -> Result<T> {
        self.error_for_status(what)?.json()
    }

    /// Passes the response through when the status is 2xx.
    ///
    /// # Errors
    ///
    /// * `ZenglError::Api` - For any other status, with `what` as the message
    ///   and the body kept for diagnosis.
    pub fn error_for_status(self, what: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            let status = self.status_code();
            Err(ZenglError::api(what, status, self.text()).into())
        }
    }
}
