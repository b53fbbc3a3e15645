//! Security-scan upload for release application packages.
//!
//! The scanning service hands out a one-time upload URL; the package is then
//! posted there as a multipart form with a free-text comment.

use crate::config::ScanConfig;
use crate::error::{ConfigError, ReleaseError, RemoteError, Result};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use tokio_util::io::ReaderStream;
use url::Url;

/// Release APK location, relative to the project root
pub const DEFAULT_APK_PATH: &str = "shellapp/build/outputs/apk/release/shellapp-release.apk";

/// Comment attached to an upload of an APK built with `sdk_version`
pub fn upload_comment(sdk_version: &str) -> String {
    format!("APK with SDK v{sdk_version}")
}

#[derive(Deserialize)]
struct UploadInit {
    upload_url: String,
}

/// Client for the scanning service upload API
#[derive(Debug, Clone)]
pub struct ScanUploadClient {
    http: reqwest::Client,
    init_url: Url,
}

impl ScanUploadClient {
    /// Create a client targeting the given upload-init endpoint
    pub fn new(init_url: &str) -> Result<Self> {
        let init_url = Url::parse(init_url)?;
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, init_url })
    }

    /// Request a one-time upload URL.
    ///
    /// An empty key is rejected before any request is made.
    pub async fn init_upload(&self, api_key: &str) -> Result<Url> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                key: crate::config::SCAN_API_KEY_VAR.to_string(),
            }
            .into());
        }

        log::debug!("Requesting upload URL from {}", self.init_url);
        let response = self
            .http
            .post(self.init_url.clone())
            .header(reqwest::header::AUTHORIZATION, format!("APIKey {api_key}"))
            .send()
            .await?;

        let response = check(response, "upload init").await?;
        let init: UploadInit = response.json().await?;
        Ok(Url::parse(&init.upload_url)?)
    }

    /// Post `file_path` and `comment` to the upload URL as a multipart form
    pub async fn submit_file(&self, upload_url: &Url, file_path: &Path, comment: &str) -> Result<()> {
        if !tokio::fs::try_exists(file_path).await? {
            return Err(ReleaseError::MissingArtifact {
                path: file_path.to_path_buf(),
            });
        }

        let file = tokio::fs::File::open(file_path).await?;
        let length = file.metadata().await?.len();
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.apk".to_string());

        let part = Part::stream_with_length(reqwest::Body::wrap_stream(ReaderStream::new(file)), length)
            .file_name(file_name);
        let form = Form::new()
            .part("file", part)
            .text("comments", comment.to_string());

        log::info!("Uploading {} ({} bytes)", file_path.display(), length);
        let response = self
            .http
            .post(upload_url.clone())
            .multipart(form)
            .send()
            .await?;
        check(response, "submit file").await?;
        Ok(())
    }

    /// Run the full upload: init, then submit
    pub async fn upload(&self, config: &ScanConfig, file_path: &Path, comment: &str) -> Result<()> {
        let upload_url = self.init_upload(&config.api_key).await?;
        self.submit_file(&upload_url, file_path, comment).await
    }
}

async fn check(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::from_body(operation, status.as_u16(), &body).into())
}
