//! # Zenodo Deposition Operations (`common::zenodo::deposition`)
//!
//! File: cli/src/common/zenodo/deposition.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! One function per deposition endpoint. Each function makes exactly one
//! request, authenticated with the `access_token` query parameter, and returns
//! the raw `ApiResponse` without judging the status code. A 404 from
//! `publish` therefore comes back as a response, not as an error; only
//! transport failures are raised.
//!
//! | Function  | Method | Endpoint                                            |
//! |-----------|--------|-----------------------------------------------------|
//! | `create`  | POST   | `{base}/api/deposit/depositions`                    |
//! | `fetch`   | GET    | `{base}/api/deposit/depositions/{id}`               |
//! | `list`    | GET    | `{base}/api/deposit/depositions`                    |
//! | `publish` | POST   | `{base}/api/deposit/depositions/{id}/actions/publish` |
//! | `discard` | DELETE | `{base}/api/deposit/depositions/{id}`               |
//!
use super::models::DepositionMetadata;
use crate::common::network::http::ApiResponse;
use crate::core::error::Result;
use anyhow::Context;
use serde_json::json;
use tracing::{debug, info};

const DEPOSITIONS_PATH: &str = "/api/deposit/depositions";

fn depositions_url(base_url: &str) -> String {
    format!("{}{}", base_url, DEPOSITIONS_PATH)
}

fn deposition_url(base_url: &str, deposition_id: u64) -> String {
    format!("{}/{}", depositions_url(base_url), deposition_id)
}

/// Adds the token, sends the request and buffers the answer.
///
/// # Errors
///
/// Only transport failures (DNS, connection refused, TLS, interrupted body).
/// Every HTTP status, 4xx and 5xx included, comes back as `Ok`.
async fn send(request: reqwest::RequestBuilder, token: &str) -> Result<ApiResponse> {
    let response = request
        .query(&[("access_token", token)]) // Zenodo takes the token as a query parameter
        .send()
        .await
        .context("Zenodo request failed")?;
    debug!("Zenodo responded {} for {}", response.status(), response.url().path());
    ApiResponse::read(response).await
}

/// Creates an empty draft deposition.
///
/// The metadata, when given, is sent wrapped as `{"metadata": {...}}`. Without
/// it an empty JSON object is sent and Zenodo creates a draft with blank
/// metadata, to be completed before publishing.
///
/// # Arguments
///
/// * `client` - Shared HTTP client (see `network::http::build_client`).
/// * `token` - Zenodo access token with the `deposit:write` scope.
/// * `base_url` - API root, e.g. `https://sandbox.zenodo.org`.
/// * `metadata` - Optional descriptive metadata for the new record.
///
/// # Returns
///
/// * `Result<ApiResponse>` - Zenodo's answer, uninterpreted. On success the
///   status is 201 and the body is the new `Deposition`, including its
///   `links.bucket`.
///
/// # Errors
///
/// Transport failures only.
pub async fn create(
    client: &reqwest::Client,
    token: &str,
    base_url: &str,
    metadata: Option<&DepositionMetadata>,
) -> Result<ApiResponse> {
    let body = match metadata {
        Some(metadata) => json!({ "metadata": metadata }),
        None => json!({}),
    };
    info!("Creating new deposition at {}", base_url);
    send(client.post(depositions_url(base_url)).json(&body), token).await
}

/// Retrieves one deposition record.
///
/// # Arguments
///
/// * `client` - Shared HTTP client.
/// * `token` - Zenodo access token.
/// * `base_url` - API root.
/// * `deposition_id` - Id returned by `create`.
///
/// # Returns
///
/// * `Result<ApiResponse>` - 200 with the `Deposition` body, or 404 when the id
///   is unknown to this account.
///
/// # Errors
///
/// Transport failures only.
pub async fn fetch(
    client: &reqwest::Client,
    token: &str,
    base_url: &str,
    deposition_id: u64,
) -> Result<ApiResponse> {
    debug!("Fetching deposition {}", deposition_id);
    send(client.get(deposition_url(base_url, deposition_id)), token).await
}

/// Lists the depositions owned by the token's user.
///
/// Zenodo's default page size applies; no pagination parameters are sent.
///
/// # Returns
///
/// * `Result<ApiResponse>` - 200 with a JSON array of `Deposition` records.
pub async fn list(client: &reqwest::Client, token: &str, base_url: &str) -> Result<ApiResponse> {
    send(client.get(depositions_url(base_url)), token).await
}

/// Publishes a draft deposition.
///
/// Irreversible: the record becomes public, gets its DOI, and can no longer be
/// discarded. The token needs the `deposit:actions` scope.
///
/// # Arguments
///
/// * `client` - Shared HTTP client.
/// * `token` - Zenodo access token.
/// * `base_url` - API root.
/// * `deposition_id` - Draft to publish.
///
/// # Returns
///
/// * `Result<ApiResponse>` - 202 with the published `Deposition` on success.
///   A 404 for an unknown id, or a 400 for a draft with incomplete metadata,
///   is returned the same way.
///
/// # Errors
///
/// Transport failures only.
pub async fn publish(
    client: &reqwest::Client,
    token: &str,
    base_url: &str,
    deposition_id: u64,
) -> Result<ApiResponse> {
    info!("Publishing deposition {}", deposition_id);
    let url = format!("{}/actions/publish", deposition_url(base_url, deposition_id));
    send(client.post(url), token).await
}

/// Deletes an unpublished draft.
///
/// # Returns
///
/// * `Result<ApiResponse>` - 204 with an empty body on success; 404 for an
///   unknown id; 403 when the deposition is already published.
///
/// # Errors
///
/// Transport failures only.
pub async fn discard(
    client: &reqwest::Client,
    token: &str,
    base_url: &str,
    deposition_id: u64,
) -> Result<ApiResponse> {
    info!("Discarding deposition {}", deposition_id);
    send(client.delete(deposition_url(base_url, deposition_id)), token).await
}
