//! Bintray REST API client.

use super::{NewVersion, PackageRepository, PackageSummary};
use crate::config::{Credentials, ReleaseDescriptor};
use crate::error::{ConfigError, ReleaseError, RemoteError, RemoteErrorKind, Result};
use reqwest::header::CONTENT_LENGTH;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use std::path::Path;
use tokio_util::io::ReaderStream;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Package creation body
#[derive(Serialize)]
struct CreatePackage<'a> {
    name: &'a str,
    desc: &'a str,
    licenses: &'a [String],
    website_url: &'a str,
}

/// Bintray client bound to one organization and repository
#[derive(Debug, Clone)]
pub struct BintrayClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl BintrayClient {
    /// Create a client for `base_url` (e.g. `https://api.bintray.com`)
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEndpoint {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            }
            .into());
        }

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// Build an endpoint URL from path segments, percent-encoding each one
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidEndpoint {
                url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn subject(&self) -> [&str; 2] {
        [
            self.credentials.organization.as_str(),
            self.credentials.repository.as_str(),
        ]
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response> {
        let response = request
            .basic_auth(&self.credentials.user, Some(&self.credentials.api_key))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::debug!("{} rejected ({}): {}", operation, status, body);
        Err(RemoteError::from_body(operation, status.as_u16(), &body).into())
    }
}

/// Mark a failed version lookup as [`RemoteErrorKind::NotFound`] when the
/// service reports exactly `Version '<version>' was not found`.
///
/// Every other error, including differently worded messages, is returned
/// unchanged.
pub fn classify_version_lookup(error: ReleaseError, version: &str) -> ReleaseError {
    match error {
        ReleaseError::Remote(mut remote)
            if remote.message == format!("Version '{version}' was not found") =>
        {
            remote.kind = RemoteErrorKind::NotFound;
            ReleaseError::Remote(remote)
        }
        other => other,
    }
}

impl PackageRepository for BintrayClient {
    async fn list_packages(&self) -> Result<Vec<PackageSummary>> {
        let [org, repo] = self.subject();
        let url = self.endpoint(["repos", org, repo, "packages"])?;
        let response = self.send(self.http.get(url), "list packages").await?;
        Ok(response.json().await?)
    }

    async fn create_package(&self, descriptor: &ReleaseDescriptor) -> Result<()> {
        let [org, repo] = self.subject();
        let url = self.endpoint(["packages", org, repo])?;
        let body = CreatePackage {
            name: &descriptor.name,
            desc: &descriptor.description,
            licenses: &descriptor.licenses,
            website_url: &descriptor.website_url,
        };
        self.send(self.http.post(url).json(&body), "create package")
            .await?;
        Ok(())
    }

    async fn get_version(&self, package: &str, version: &str) -> Result<()> {
        let [org, repo] = self.subject();
        let url = self.endpoint(["packages", org, repo, package, "versions", version])?;
        self.send(self.http.get(url), "get version")
            .await
            .map_err(|e| classify_version_lookup(e, version))?;
        Ok(())
    }

    async fn create_version(&self, package: &str, version: &NewVersion) -> Result<()> {
        let [org, repo] = self.subject();
        let url = self.endpoint(["packages", org, repo, package, "versions"])?;
        self.send(self.http.post(url).json(version), "create version")
            .await?;
        Ok(())
    }

    async fn upload_content(
        &self,
        package: &str,
        version: &str,
        local_path: &Path,
        remote_path: &str,
    ) -> Result<()> {
        let [org, repo] = self.subject();
        let mut url = self.endpoint(
            ["content", org, repo, package, version]
                .into_iter()
                .chain(remote_path.split('/').filter(|s| !s.is_empty())),
        )?;
        url.query_pairs_mut().append_pair("override", "1");

        let file = tokio::fs::File::open(local_path).await?;
        let length = file.metadata().await?.len();
        let body = reqwest::Body::wrap_stream(ReaderStream::new(file));

        let request = self.http.put(url).header(CONTENT_LENGTH, length).body(body);
        self.send(request, "upload content").await?;
        Ok(())
    }

    async fn publish_version(&self, package: &str, version: &str) -> Result<()> {
        let [org, repo] = self.subject();
        let url = self.endpoint(["content", org, repo, package, version, "publish"])?;
        self.send(self.http.post(url), "publish version").await?;
        Ok(())
    }
}
