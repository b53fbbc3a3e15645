//! Artifact plan for an SDK release.
//!
//! The plan is computed in full from the build flavor and version before
//! any upload begins, so every remote path in a run shares one version.

use crate::error::{CliError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Version used for every white-label build
pub const WHITE_LABEL_VERSION: &str = "1.0.0";

/// Maven group path shared by all modules
pub const GROUP_PATH: &str = "com/clarabridge";

/// SDK modules, in upload order
pub const MODULES: [&str; 2] = ["core", "ui"];

/// Module that owns the documentation archive
pub const DOCS_MODULE: &str = "ui";

/// Base name of the documentation archive
pub const DOCS_NAME: &str = "clarabridgechat";

/// Build flavor selecting local artifact locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFlavor {
    /// Regular Gradle module outputs
    Standard,
    /// Repackaged white-label outputs collected under `build/`
    WhiteLabel,
}

impl BuildFlavor {
    /// Flavor for the `--whitelabel` flag
    pub fn from_white_label(white_label: bool) -> Self {
        if white_label {
            BuildFlavor::WhiteLabel
        } else {
            BuildFlavor::Standard
        }
    }
}

/// Kind of artifact produced per module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Compiled classes jar
    Classes,
    /// Android archive
    Archive,
    /// Maven project object model
    Descriptor,
    /// Javadoc archive
    Documentation,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Classes => "classes",
            ArtifactKind::Archive => "aar",
            ArtifactKind::Descriptor => "pom",
            ArtifactKind::Documentation => "javadoc",
        };
        f.write_str(name)
    }
}

/// A local file and the remote path it is uploaded to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference {
    /// Module the artifact belongs to
    pub module: String,
    /// What the artifact is
    pub kind: ArtifactKind,
    /// File on disk
    pub local_path: PathBuf,
    /// Path within the remote package version
    pub remote_path: String,
}

/// Resolve the version identifier for a run.
///
/// White-label builds always use [`WHITE_LABEL_VERSION`]; standard builds
/// use the supplied build version verbatim.
pub fn resolve_version(flavor: BuildFlavor, build_version: Option<&str>) -> Result<String> {
    match flavor {
        BuildFlavor::WhiteLabel => {
            if let Some(ignored) = build_version {
                log::warn!(
                    "White-label builds are published as {}; ignoring build version {}",
                    WHITE_LABEL_VERSION,
                    ignored
                );
            }
            Ok(WHITE_LABEL_VERSION.to_string())
        }
        BuildFlavor::Standard => build_version
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::MissingArgument {
                    argument: "--build-version".to_string(),
                }
                .into()
            }),
    }
}

/// Remote path of a module artifact
pub fn remote_path(module: &str, version: &str, kind: ArtifactKind) -> String {
    match kind {
        ArtifactKind::Classes => {
            format!("{GROUP_PATH}/{module}/{version}/{module}-{version}-classes.jar")
        }
        ArtifactKind::Archive => format!("{GROUP_PATH}/{module}/{version}/{module}-{version}.aar"),
        ArtifactKind::Descriptor => {
            format!("{GROUP_PATH}/{module}/{version}/{module}-{version}.pom")
        }
        ArtifactKind::Documentation => {
            format!("{GROUP_PATH}/{DOCS_MODULE}/{version}/{DOCS_NAME}-{version}-javadoc.jar")
        }
    }
}

/// Local path of a module artifact, relative to the project root
pub fn local_path(flavor: BuildFlavor, module: &str, version: &str, kind: ArtifactKind) -> PathBuf {
    let relative = match (flavor, kind) {
        (BuildFlavor::WhiteLabel, ArtifactKind::Classes) => {
            format!("build/{module}/{module}-{version}-classes.jar")
        }
        (BuildFlavor::WhiteLabel, ArtifactKind::Archive) => {
            format!("build/{module}/{module}-{version}.aar")
        }
        (BuildFlavor::WhiteLabel, ArtifactKind::Descriptor) => {
            format!("build/{module}/{module}-{version}.pom")
        }
        (BuildFlavor::WhiteLabel, ArtifactKind::Documentation) => {
            format!("build/docs/{DOCS_NAME}-{version}-javadoc.jar")
        }
        (BuildFlavor::Standard, ArtifactKind::Classes) => {
            format!("{module}/build/libs/{module}-{version}-classes.jar")
        }
        (BuildFlavor::Standard, ArtifactKind::Archive) => {
            format!("{module}/build/outputs/aar/{module}-release.aar")
        }
        (BuildFlavor::Standard, ArtifactKind::Descriptor) => {
            format!("{module}/build/poms/pom-default.xml")
        }
        (BuildFlavor::Standard, ArtifactKind::Documentation) => {
            format!("{DOCS_MODULE}/build/libs/{DOCS_NAME}-{version}-javadoc.jar")
        }
    };
    PathBuf::from(relative)
}

/// Compute the full, ordered upload plan.
///
/// Order: each module's classes, archive and descriptor in [`MODULES`]
/// order, then the documentation archive.
pub fn plan(project_root: &Path, flavor: BuildFlavor, version: &str) -> Vec<ArtifactReference> {
    let reference = |module: &str, kind: ArtifactKind| ArtifactReference {
        module: module.to_string(),
        kind,
        local_path: project_root.join(local_path(flavor, module, version, kind)),
        remote_path: remote_path(module, version, kind),
    };

    let mut artifacts: Vec<ArtifactReference> = MODULES
        .into_iter()
        .flat_map(|module| {
            [
                ArtifactKind::Classes,
                ArtifactKind::Archive,
                ArtifactKind::Descriptor,
            ]
            .into_iter()
            .map(move |kind| reference(module, kind))
        })
        .collect();
    artifacts.push(reference(DOCS_MODULE, ArtifactKind::Documentation));
    artifacts
}
