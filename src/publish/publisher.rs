//! Ensure-upload-publish driver.

use crate::artifact::ArtifactReference;
use crate::bintray::{NewVersion, PackageRepository};
use crate::config::ReleaseDescriptor;
use crate::error::{ReleaseError, Result};
use std::fmt;

/// One unit of work in a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStep {
    /// Create the package unless it already exists
    EnsurePackage,
    /// Create the version unless it already exists
    EnsureVersion,
    /// Upload one artifact
    Upload(ArtifactReference),
    /// Finalize the version
    Publish,
}

impl fmt::Display for ReleaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseStep::EnsurePackage => f.write_str("ensure package"),
            ReleaseStep::EnsureVersion => f.write_str("ensure version"),
            ReleaseStep::Upload(artifact) => {
                write!(f, "upload {} {}", artifact.module, artifact.kind)
            }
            ReleaseStep::Publish => f.write_str("publish"),
        }
    }
}

/// Summary of a completed release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Package name
    pub package: String,
    /// Published version
    pub version: String,
    /// Whether the package was created by this run
    pub package_created: bool,
    /// Whether the version was created by this run
    pub version_created: bool,
    /// Remote paths uploaded, in order
    pub uploaded: Vec<String>,
}

/// Drives a release of one version of one package
pub struct ReleasePublisher<'a, R> {
    repository: &'a R,
    descriptor: &'a ReleaseDescriptor,
    version: &'a str,
}

impl<'a, R: PackageRepository> ReleasePublisher<'a, R> {
    /// Create a publisher for `version` of the package described by `descriptor`
    pub fn new(repository: &'a R, descriptor: &'a ReleaseDescriptor, version: &'a str) -> Self {
        Self {
            repository,
            descriptor,
            version,
        }
    }

    /// Steps of a full release, in execution order
    pub fn steps(artifacts: &[ArtifactReference]) -> Vec<ReleaseStep> {
        let mut steps = Vec::with_capacity(artifacts.len() + 3);
        steps.push(ReleaseStep::EnsurePackage);
        steps.push(ReleaseStep::EnsureVersion);
        steps.extend(artifacts.iter().cloned().map(ReleaseStep::Upload));
        steps.push(ReleaseStep::Publish);
        steps
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// `on_step` is called before each step starts.
    pub async fn run<F>(&self, artifacts: &[ArtifactReference], mut on_step: F) -> Result<PublishReport>
    where
        F: FnMut(&ReleaseStep),
    {
        let mut report = PublishReport {
            package: self.descriptor.name.clone(),
            version: self.version.to_string(),
            ..Default::default()
        };

        for step in Self::steps(artifacts) {
            on_step(&step);
            match &step {
                ReleaseStep::EnsurePackage => report.package_created = self.ensure_package().await?,
                ReleaseStep::EnsureVersion => report.version_created = self.ensure_version().await?,
                ReleaseStep::Upload(artifact) => {
                    self.upload_artifact(artifact).await?;
                    report.uploaded.push(artifact.remote_path.clone());
                }
                ReleaseStep::Publish => self.publish().await?,
            }
        }

        Ok(report)
    }

    /// Create the package if no remote package has exactly this name.
    ///
    /// Returns whether it was created.
    pub async fn ensure_package(&self) -> Result<bool> {
        let packages = self.repository.list_packages().await?;
        if packages.iter().any(|p| p.name == self.descriptor.name) {
            log::debug!("Package {} already exists", self.descriptor.name);
            return Ok(false);
        }

        log::info!("Package {} not found, creating", self.descriptor.name);
        self.repository.create_package(self.descriptor).await?;
        Ok(true)
    }

    /// Create the version if the lookup reports it absent.
    ///
    /// Any other lookup failure is returned as is. Returns whether it was
    /// created.
    pub async fn ensure_version(&self) -> Result<bool> {
        match self
            .repository
            .get_version(&self.descriptor.name, self.version)
            .await
        {
            Ok(()) => {
                log::debug!("Version {} already exists", self.version);
                Ok(false)
            }
            Err(e) if e.is_not_found() => {
                log::info!("Version {} not found, creating", self.version);
                self.repository
                    .create_version(&self.descriptor.name, &NewVersion::tagged(self.version))
                    .await?;
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    /// Upload one artifact with overwrite enabled
    pub async fn upload_artifact(&self, artifact: &ArtifactReference) -> Result<()> {
        if !tokio::fs::try_exists(&artifact.local_path).await? {
            return Err(ReleaseError::MissingArtifact {
                path: artifact.local_path.clone(),
            });
        }

        log::info!(
            "Uploading {} -> {}",
            artifact.local_path.display(),
            artifact.remote_path
        );
        self.repository
            .upload_content(
                &self.descriptor.name,
                self.version,
                &artifact.local_path,
                &artifact.remote_path,
            )
            .await
    }

    /// Finalize the version
    pub async fn publish(&self) -> Result<()> {
        log::info!("Publishing {} {}", self.descriptor.name, self.version);
        self.repository
            .publish_version(&self.descriptor.name, self.version)
            .await
    }
}
