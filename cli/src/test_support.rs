//! # zengl Test Support
//!
//! File: cli/src/test_support.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `FakeServer` is an in-process `axum` server that plays both GitLab and
//! Zenodo for unit tests. It records every request and keeps just enough
//! state to behave like the real services:
//!
//! - Zenodo depositions: create (ids start at 42, bucket `/api/files/bucket-{id}`),
//!   fetch, list, publish (adds a DOI), discard; unknown ids answer 404. An
//!   empty or missing `access_token` answers 401.
//! - Bucket uploads: `PUT /api/files/{bucket}/{name}` stores the body. The
//!   bucket named `forbidden` answers 403.
//! - GitLab: tag creation and release creation (requires `PRIVATE-TOKEN`),
//!   release listing newest first. Release assets point at
//!   `/archive/{tag}/{name}-{tag}.{format}` on the same server.
//! - `GET /archive/...` serves deterministic bytes (`archive_bytes`).
//!
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const FIRST_DEPOSITION_ID: u64 = 42;

/// One request as the fake server saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Value of the `PRIVATE-TOKEN` header.
    pub header_token: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Default)]
struct FakeData {
    base_url: String,
    calls: Vec<RecordedCall>,
    next_id: u64,
    depositions: Vec<Value>,
    /// Newest first, per project path segment.
    releases: HashMap<String, Vec<Value>>,
    release_formats: Vec<String>,
    uploads: HashMap<String, Vec<u8>>,
}

type Shared = Arc<Mutex<FakeData>>;

pub struct FakeServer {
    base_url: String,
    data: Shared,
}

impl FakeServer {
    /// Binds to an ephemeral localhost port and serves in the background.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake server");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
        let data: Shared = Arc::new(Mutex::new(FakeData {
            base_url: base_url.clone(),
            next_id: FIRST_DEPOSITION_ID,
            release_formats: ["zip", "tar.gz", "tar.bz2", "tar"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
            ..Default::default()
        }));
        let app = Router::new().fallback(handle).with_state(data.clone());
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service())
                .await
                .expect("fake server");
        });
        Self { base_url, data }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.data.lock().unwrap().calls.clone()
    }

    /// Formats attached to releases created from now on.
    pub fn set_release_formats(&self, formats: &[&str]) {
        self.data.lock().unwrap().release_formats = formats.iter().map(|f| f.to_string()).collect();
    }

    /// Bytes stored by a bucket upload at `path`.
    pub fn upload(&self, path: &str) -> Option<Vec<u8>> {
        self.data.lock().unwrap().uploads.get(path).cloned()
    }

    /// The body served for `GET {path}` under `/archive/`.
    pub fn archive_bytes(path: &str) -> Vec<u8> {
        format!("fake archive at {}", path).into_bytes()
    }
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, axum::Json(body)).into_response()
}

fn not_found() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        json!({ "status": 404, "message": "PID does not exist." }),
    )
}

fn access_token(query: Option<&str>) -> Option<&str> {
    query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("access_token="))
        .filter(|token| !token.is_empty())
}

async fn handle(
    State(data): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let query = uri.query().map(str::to_string);
    let header_token = headers
        .get("PRIVATE-TOKEN")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut data = data.lock().unwrap();
    data.calls.push(RecordedCall {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        header_token: header_token.clone(),
        body: body.to_vec(),
    });

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("GET", ["archive", ..]) => {
            (StatusCode::OK, FakeServer::archive_bytes(&path)).into_response()
        }
        (_, ["api", "deposit", ..]) | (_, ["api", "files", ..])
            if access_token(query.as_deref()).is_none() =>
        {
            json_response(
                StatusCode::UNAUTHORIZED,
                json!({ "status": 401, "message": "The server could not verify that you are authorized." }),
            )
        }
        ("POST", ["api", "deposit", "depositions"]) => {
            let id = data.next_id;
            data.next_id += 1;
            let sent: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            let deposition = json!({
                "id": id,
                "title": sent["metadata"]["title"].as_str().unwrap_or_default(),
                "state": "unsubmitted",
                "submitted": false,
                "doi": "",
                "links": {
                    "bucket": format!("{}/api/files/bucket-{}", data.base_url, id),
                    "html": format!("{}/deposit/{}", data.base_url, id),
                },
                "metadata": sent["metadata"].clone(),
            });
            data.depositions.push(deposition.clone());
            json_response(StatusCode::CREATED, deposition)
        }
        ("GET", ["api", "deposit", "depositions"]) => {
            json_response(StatusCode::OK, Value::Array(data.depositions.clone()))
        }
        (_, ["api", "deposit", "depositions", id, rest @ ..]) => {
            let id: u64 = id.parse().unwrap_or(0);
            let Some(index) = data.depositions.iter().position(|d| d["id"] == id) else {
                return not_found();
            };
            match (method.as_str(), rest) {
                ("GET", []) => json_response(StatusCode::OK, data.depositions[index].clone()),
                ("DELETE", []) => {
                    data.depositions.remove(index);
                    StatusCode::NO_CONTENT.into_response()
                }
                ("POST", ["actions", "publish"]) => {
                    let deposition = &mut data.depositions[index];
                    deposition["submitted"] = json!(true);
                    deposition["state"] = json!("done");
                    deposition["doi"] = json!(format!("10.5072/zenodo.{}", id));
                    json_response(StatusCode::ACCEPTED, deposition.clone())
                }
                _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
            }
        }
        ("PUT", ["api", "files", "forbidden", ..]) => json_response(
            StatusCode::FORBIDDEN,
            json!({ "status": 403, "message": "Bucket is locked." }),
        ),
        ("PUT", ["api", "files", _bucket, name]) => {
            let key = name.to_string();
            data.uploads.insert(path.clone(), body.to_vec());
            json_response(
                StatusCode::CREATED,
                json!({ "key": key, "size": body.len() }),
            )
        }
        ("POST", ["api", "v4", "projects", _, ..]) if header_token.is_none() => json_response(
            StatusCode::UNAUTHORIZED,
            json!({ "message": "401 Unauthorized" }),
        ),
        ("POST", ["api", "v4", "projects", _, "repository", "tags"]) => {
            let sent: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            json_response(
                StatusCode::CREATED,
                json!({
                    "name": sent["tag_name"],
                    "message": null,
                    "target": "2695effb5807a22ff3d138d593fd856244e155e7",
                }),
            )
        }
        ("POST", ["api", "v4", "projects", project, "releases"]) => {
            let sent: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            let tag = sent["tag_name"].as_str().unwrap_or_default().to_string();
            let name = project.rsplit("%2F").next().unwrap_or(project).to_string();
            let sources: Vec<Value> = data
                .release_formats
                .iter()
                .map(|format| {
                    json!({
                        "format": format,
                        "url": format!("{}/archive/{}/{}-{}.{}", data.base_url, tag, name, tag, format),
                    })
                })
                .collect();
            let release = json!({
                "tag_name": tag,
                "name": tag,
                "description": sent["description"],
                "released_at": "2024-03-01T10:00:00.000Z",
                "assets": { "count": sources.len(), "sources": sources, "links": [] },
            });
            data.releases
                .entry(project.to_string())
                .or_default()
                .insert(0, release.clone());
            json_response(StatusCode::CREATED, release)
        }
        ("GET", ["api", "v4", "projects", project, "releases"]) => {
            let releases = data.releases.get(*project).cloned().unwrap_or_default();
            json_response(StatusCode::OK, Value::Array(releases))
        }
        _ => not_found(),
    }
}
