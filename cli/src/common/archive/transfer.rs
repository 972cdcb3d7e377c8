//! # zengl Archive Transfers (`common::archive::transfer`)
//!
//! File: cli/src/common/archive/transfer.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Stateless steps that move a release archive from GitLab into a Zenodo
//! bucket:
//! 1. `resolve_archive_url`: pick the source asset of the requested format.
//! 2. `derive_filename_from_url`: default local name for the download.
//! 3. `download_archive`: GET the archive and write it to disk.
//! 4. `upload_archive`: PUT the file into the deposition bucket and, unless
//!    told otherwise, delete the local copy.
//!
//! ## Cleanup policy
//!
//! `upload_archive` deletes the local file as soon as the PUT has returned,
//! whatever status Zenodo answered with. If the PUT itself fails (connection
//! error) the file is kept. A failed deletion is reported even though the
//! upload already happened; nothing is rolled back remotely.
//!
use super::format::ArchiveFormat;
use crate::common::fs::io;
use crate::common::gitlab::models::Release;
use crate::common::network::http::ApiResponse;
use crate::core::error::{Result, ZenglError};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Returns the URL of the first source asset whose format token matches.
///
/// # Errors
///
/// `ZenglError::NoSuchSourceArchive` when the release has no asset of that format.
pub fn resolve_archive_url(
    release: &Release,
    format: ArchiveFormat,
) -> std::result::Result<&str, ZenglError> {
    release
        .assets
        .sources
        .iter()
        .find(|source| source.format == format.as_str())
        .map(|source| source.url.as_str())
        .ok_or(ZenglError::NoSuchSourceArchive { format })
}

/// Text after the last `/` of `url`. Input without `/` is returned unchanged.
pub fn derive_filename_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}

/// Downloads `url` to `filename`, or to `derive_filename_from_url(url)` in the
/// current directory when no filename is given.
///
/// One GET, body buffered in memory, then written in one go. An existing file
/// is overwritten.
///
/// # Arguments
///
/// * `client` - Shared HTTP client.
/// * `url` - Archive URL, usually a release source asset.
/// * `filename` - Where to write; `None` names the file after the URL.
///
/// # Returns
///
/// * `Result<PathBuf>` - The path written.
///
/// # Errors
///
/// * `ZenglError::Api` - Non-2xx answer. Nothing is written in that case.
/// * Transport or filesystem errors, with context.
pub async fn download_archive(
    client: &reqwest::Client,
    url: &str,
    filename: Option<&Path>,
) -> Result<PathBuf> {
    download_archive_with(client, url, filename, derive_filename_from_url).await
}

/// Like `download_archive`, with a custom naming function used when
/// `filename` is `None`.
pub async fn download_archive_with<F>(
    client: &reqwest::Client,
    url: &str,
    filename: Option<&Path>,
    naming_fn: F,
) -> Result<PathBuf>
where
    F: Fn(&str) -> String,
{
    let target = match filename {
        Some(name) => name.to_path_buf(),
        None => PathBuf::from(naming_fn(url)),
    };
    info!("Downloading {} to {}", url, target.display());

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download archive from {}", url))?;
    let response = ApiResponse::read(response)
        .await?
        .error_for_status(&format!("Failed to download archive from {}", url))?;

    io::write_bytes_to_file(&target, &response.body)?;
    Ok(target)
}

/// Uploads the file at `path` to `{bucket_url}/{file name}` and returns
/// Zenodo's response uninterpreted. See the module docs for the cleanup policy.
///
/// # Arguments
///
/// * `client` - Shared HTTP client.
/// * `token` - Zenodo access token, sent as `access_token`.
/// * `path` - Local archive; its file name becomes the key in the bucket.
/// * `bucket_url` - The deposition's `links.bucket`.
/// * `cleanup` - Delete `path` once the PUT has been answered.
///
/// # Returns
///
/// * `Result<ApiResponse>` - The bucket's answer, whatever its status (201 on
///   success). Cleanup has already happened when this returns.
///
/// # Errors
///
/// * The file cannot be read, or its name is not valid UTF-8.
/// * Transport failure on the PUT. The file is kept in that case.
/// * Deleting the file fails after the PUT.
pub async fn upload_archive(
    client: &reqwest::Client,
    token: &str,
    path: &Path,
    bucket_url: &str,
    cleanup: bool,
) -> Result<ApiResponse> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Archive path has no usable file name: {}", path.display()))?;
    let content = io::read_file_bytes(path)?;
    let url = format!("{}/{}", bucket_url, name);
    info!("Uploading {} ({} bytes) to {}", name, content.len(), bucket_url);

    let response = client
        .put(&url)
        .query(&[("access_token", token)])
        .body(content)
        .send()
        .await
        .with_context(|| format!("Failed to upload {} to {}", name, bucket_url))?;
    let response = ApiResponse::read(response).await?;
    debug!("Bucket responded {} for {}", response.status, name);

    if cleanup {
        io::remove_file(path)?;
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::gitlab::models::{ReleaseAssets, SourceAsset};
    use crate::common::network::http::build_client;
    use crate::test_support::FakeServer;
    use tempfile::tempdir;

    fn release_with(formats: &[&str]) -> Release {
        Release {
            tag_name: "1.0".into(),
            assets: ReleaseAssets {
                sources: formats
                    .iter()
                    .map(|format| SourceAsset {
                        format: format.to_string(),
                        url: format!("https://gitlab.com/g/p/-/archive/1.0/p-1.0.{}", format),
                    })
                    .collect(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_each_format_returns_its_own_url() {
        let release = release_with(&["zip", "tar.gz", "tar.bz2", "tar"]);
        for format in ArchiveFormat::ALL {
            let url = resolve_archive_url(&release, format).unwrap();
            assert_eq!(
                url,
                format!("https://gitlab.com/g/p/-/archive/1.0/p-1.0.{}", format)
            );
        }
    }

    #[test]
    fn test_resolve_does_not_confuse_tar_with_tar_gz() {
        let release = release_with(&["tar.gz", "tar"]);
        assert!(resolve_archive_url(&release, ArchiveFormat::Tar)
            .unwrap()
            .ends_with("p-1.0.tar"));
    }

    #[test]
    fn test_resolve_missing_format() {
        let release = release_with(&["zip", "tar.gz"]);
        let err = resolve_archive_url(&release, ArchiveFormat::TarBz2).unwrap_err();
        assert!(matches!(
            err,
            ZenglError::NoSuchSourceArchive {
                format: ArchiveFormat::TarBz2
            }
        ));
        assert!(err.to_string().contains("tar.bz2"));

        let empty = Release::default();
        assert!(resolve_archive_url(&empty, ArchiveFormat::Zip).is_err());
    }

    #[test]
    fn test_derive_filename_from_url() {
        let name = derive_filename_from_url("https://host/path/archive-1.0.zip");
        assert_eq!(name, "archive-1.0.zip");
        assert_eq!(derive_filename_from_url(&name), name);
        assert_eq!(derive_filename_from_url("plain"), "plain");
        assert_eq!(derive_filename_from_url("https://host/dir/"), "");
    }

    #[tokio::test]
    async fn test_download_with_explicit_and_custom_names() {
        let server = FakeServer::start().await;
        let client = build_client().unwrap();
        let temp = tempdir().unwrap();
        let url = format!("{}/archive/1.0/demo-1.0.zip", server.base_url());

        let explicit = temp.path().join("explicit.zip");
        let written = download_archive(&client, &url, Some(&explicit)).await.unwrap();
        assert_eq!(written, explicit);
        assert_eq!(
            std::fs::read(&explicit).unwrap(),
            FakeServer::archive_bytes("/archive/1.0/demo-1.0.zip")
        );

        let dir = temp.path().to_path_buf();
        let custom = download_archive_with(&client, &url, None, |u| {
            dir.join(format!("custom-{}", derive_filename_from_url(u)))
                .to_string_lossy()
                .into_owned()
        })
        .await
        .unwrap();
        assert_eq!(custom, temp.path().join("custom-demo-1.0.zip"));
        assert!(custom.exists());
    }

    #[tokio::test]
    async fn test_download_not_found_writes_nothing() {
        let server = FakeServer::start().await;
        let client = build_client().unwrap();
        let temp = tempdir().unwrap();
        let target = temp.path().join("missing.zip");

        let err = download_archive(
            &client,
            &format!("{}/nowhere/missing.zip", server.base_url()),
            Some(&target),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ZenglError>().and_then(|e| e.response_code()),
            Some(404)
        );
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_upload_then_cleanup() {
        let server = FakeServer::start().await;
        let client = build_client().unwrap();
        let temp = tempdir().unwrap();
        let path = temp.path().join("demo-1.0.zip");
        std::fs::write(&path, b"zip-bytes").unwrap();
        let bucket = format!("{}/api/files/bucket-42", server.base_url());

        let response = upload_archive(&client, "zen-token", &path, &bucket, true)
            .await
            .unwrap();
        assert_eq!(response.status_code(), 201);
        assert!(!path.exists());
        assert_eq!(
            server.upload("/api/files/bucket-42/demo-1.0.zip").as_deref(),
            Some(&b"zip-bytes"[..])
        );
        let call = server.calls().pop().unwrap();
        assert_eq!(call.method, "PUT");
        assert_eq!(call.query.as_deref(), Some("access_token=zen-token"));
    }

    #[tokio::test]
    async fn test_upload_without_cleanup_keeps_file() {
        let server = FakeServer::start().await;
        let client = build_client().unwrap();
        let temp = tempdir().unwrap();
        let path = temp.path().join("demo-1.0.tar");
        std::fs::write(&path, b"tar-bytes").unwrap();
        let bucket = format!("{}/api/files/bucket-7", server.base_url());

        upload_archive(&client, "zen-token", &path, &bucket, false)
            .await
            .unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_rejected_upload_still_cleans_up() {
        let server = FakeServer::start().await;
        let client = build_client().unwrap();
        let temp = tempdir().unwrap();
        let path = temp.path().join("demo-1.0.zip");
        std::fs::write(&path, b"zip-bytes").unwrap();
        let bucket = format!("{}/api/files/forbidden", server.base_url());

        let response = upload_archive(&client, "zen-token", &path, &bucket, true)
            .await
            .unwrap();
        assert_eq!(response.status_code(), 403);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_file() {
        let client = build_client().unwrap();
        let temp = tempdir().unwrap();
        let path = temp.path().join("demo-1.0.zip");
        std::fs::write(&path, b"zip-bytes").unwrap();

        // Nothing listens on port 9 of localhost.
        let result =
            upload_archive(&client, "zen-token", &path, "http://127.0.0.1:9/api/files/b", true)
                .await;
        assert!(result.is_err());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let client = build_client().unwrap();
        let temp = tempdir().unwrap();
        let result = upload_archive(
            &client,
            "zen-token",
            &temp.path().join("absent.zip"),
            "http://127.0.0.1:9/api/files/b",
            true,
        )
        .await;
        assert!(result.unwrap_err().to_string().contains("Failed to read file"));
    }
}
