//! Bintray package repository integration.
//!
//! [`PackageRepository`] is the seam between the publishing workflow and the
//! remote service; [`BintrayClient`] implements it over the REST API.

mod client;

pub use client::{BintrayClient, classify_version_lookup};

use crate::config::ReleaseDescriptor;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Package entry returned by the package listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageSummary {
    /// Package name
    pub name: String,
}

/// Body of a version creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVersion {
    /// Version name
    pub name: String,
    /// VCS tag the version was built from
    pub vcs_tag: String,
}

impl NewVersion {
    /// Version record whose name and tag are both `version`
    pub fn tagged(version: &str) -> Self {
        Self {
            name: version.to_string(),
            vcs_tag: version.to_string(),
        }
    }
}

/// Operations the publisher needs from an artifact repository.
///
/// Implementations classify "version absent" failures of
/// [`get_version`](PackageRepository::get_version) as
/// [`RemoteErrorKind::NotFound`](crate::error::RemoteErrorKind::NotFound).
#[allow(async_fn_in_trait)]
pub trait PackageRepository {
    /// List every package in the target repository
    async fn list_packages(&self) -> Result<Vec<PackageSummary>>;

    /// Create a package from its descriptor
    async fn create_package(&self, descriptor: &ReleaseDescriptor) -> Result<()>;

    /// Fetch a version record
    async fn get_version(&self, package: &str, version: &str) -> Result<()>;

    /// Create a version record
    async fn create_version(&self, package: &str, version: &NewVersion) -> Result<()>;

    /// Upload a local file to `remote_path`, overwriting existing content
    async fn upload_content(
        &self,
        package: &str,
        version: &str,
        local_path: &Path,
        remote_path: &str,
    ) -> Result<()>;

    /// Publish every uploaded file of a version
    async fn publish_version(&self, package: &str, version: &str) -> Result<()>;
}
