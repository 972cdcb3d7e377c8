//! # zengl CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`:
//!
//! - `zengl_cmd()`: the compiled `zengl` binary.
//! - `isolated_cmd(dir)`: the binary with tokens and config variables removed
//!   from the environment and both config locations pointed at `dir`, so the
//!   developer's own settings never leak into a test.
//! - `ZenodoStub`: a tiny HTTP server on a background thread answering like
//!   Zenodo for an empty account (list is `[]`, every id is unknown) and
//!   serving fixed archive bytes under `/files/`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use std::path::Path;

/// Bytes served for every `GET /files/...`.
pub const STUB_ARCHIVE: &[u8] = b"PK\x03\x04 stub archive";

/// # Get zengl Command (`zengl_cmd`)
///
/// ## Panics
/// Panics if the `zengl` binary cannot be found via `Command::cargo_bin`.
pub fn zengl_cmd() -> Command {
    Command::cargo_bin("zengl").expect("Failed to find zengl binary for testing")
}

/// `zengl_cmd()` run from `dir`, with `dir` as the user config home and no
/// token or config variables inherited.
pub fn isolated_cmd(dir: &Path) -> Command {
    let mut cmd = zengl_cmd();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("ZENODO_TOKEN")
        .env_remove("ZENODO_URL")
        .env_remove("GITLAB_TOKEN")
        .env_remove("GITLAB_URL")
        .env_remove("ZENGL_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

pub struct ZenodoStub {
    base_url: String,
}

impl ZenodoStub {
    /// Starts the stub on an ephemeral port. The server thread lives until the
    /// test process exits.
    pub fn start() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind stub");
        listener.set_nonblocking(true).expect("nonblocking stub");
        let base_url = format!("http://{}", listener.local_addr().expect("stub addr"));

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("stub runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("stub listener");
                let app = Router::new().fallback(respond);
                axum::serve(listener, app).await.expect("stub server");
            });
        });

        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

async fn respond(uri: Uri) -> Response {
    let path = uri.path();
    if path.starts_with("/files/") {
        return (StatusCode::OK, STUB_ARCHIVE).into_response();
    }
    if path == "/api/deposit/depositions" {
        return (StatusCode::OK, Json(json!([]))).into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": 404, "message": "PID does not exist." })),
    )
        .into_response()
}
