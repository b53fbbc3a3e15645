//! Configuration for the publishing and scanning jobs.
//!
//! Configuration is resolved once at startup into immutable values and then
//! passed explicitly to the components that need it. Resolution is a pure
//! function of the properties file contents and an environment lookup, which
//! keeps it testable without touching the process environment.

mod properties;

pub use properties::parse as parse_properties;

use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Properties file consulted before the environment
pub const DEFAULT_PROPERTIES_FILE: &str = "bintray.properties";

/// Default Bintray REST endpoint
pub const DEFAULT_BINTRAY_API_URL: &str = "https://api.bintray.com";

/// Default Data Theorem upload-init endpoint
pub const DEFAULT_SCAN_INIT_URL: &str = "https://api.securetheorem.com/uploadapi/v1/upload_init";

/// Environment variable holding the scanning service API key
pub const SCAN_API_KEY_VAR: &str = "DATATHEOREM_API_KEY";

const USER: &str = "BINTRAY_USER";
const API_KEY: &str = "BINTRAY_API_KEY";
const ORG: &str = "BINTRAY_ORG";
const REPO: &str = "BINTRAY_MAVEN_REPO";
const PACKAGE: &str = "BINTRAY_PACKAGE";
const DESCRIPTION: &str = "BINTRAY_DESCRIPTION";
const WEBSITE: &str = "BINTRAY_WEBSITE";

const PUBLISHER_KEYS: [&str; 7] = [USER, API_KEY, ORG, REPO, PACKAGE, DESCRIPTION, WEBSITE];

/// License identifiers attached to every created package
pub const PACKAGE_LICENSES: [&str; 1] = ["MIT"];

/// Credentials and target for the artifact repository
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account user name
    pub user: String,
    /// API key used as the basic-auth password
    pub api_key: String,
    /// Organization (Bintray subject)
    pub organization: String,
    /// Repository within the organization
    pub repository: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .field("repository", &self.repository)
            .finish()
    }
}

/// Metadata of the remote package to ensure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    /// Package name, stable across runs
    pub name: String,
    /// Human readable description
    pub description: String,
    /// License identifiers
    pub licenses: Vec<String>,
    /// Project website
    pub website_url: String,
}

/// Where configuration values were read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// A local properties file
    PropertiesFile,
    /// Process environment variables
    Environment,
}

/// Resolved configuration for the `bintray` job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherConfig {
    /// Repository credentials
    pub credentials: Credentials,
    /// Package to ensure and publish into
    pub descriptor: ReleaseDescriptor,
    /// Origin of the values
    pub source: ConfigSource,
}

impl PublisherConfig {
    /// Build the configuration from its sources.
    ///
    /// When `properties` is `Some`, it is used exclusively and `env` is never
    /// consulted.
    pub fn from_sources<F>(properties: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (values, source): (HashMap<String, String>, ConfigSource) = match properties {
            Some(contents) => (parse_properties(contents), ConfigSource::PropertiesFile),
            None => (
                PUBLISHER_KEYS
                    .into_iter()
                    .filter_map(|key| env(key).map(|value| (key.to_string(), value)))
                    .collect(),
                ConfigSource::Environment,
            ),
        };

        let credentials = Credentials {
            user: required(&values, USER)?,
            api_key: required(&values, API_KEY)?,
            organization: required(&values, ORG)?,
            repository: required(&values, REPO)?,
        };

        let descriptor = ReleaseDescriptor {
            name: required(&values, PACKAGE)?,
            description: values.get(DESCRIPTION).cloned().unwrap_or_default(),
            licenses: PACKAGE_LICENSES.iter().map(|l| l.to_string()).collect(),
            website_url: values.get(WEBSITE).cloned().unwrap_or_default(),
        };

        Ok(Self {
            credentials,
            descriptor,
            source,
        })
    }

    /// Load from `properties_path` if it exists, otherwise from the process environment
    pub fn load(properties_path: &Path) -> Result<Self> {
        let contents = if properties_path.is_file() {
            log::debug!("Reading configuration from {}", properties_path.display());
            Some(std::fs::read_to_string(properties_path)?)
        } else {
            log::debug!(
                "{} not found, reading configuration from environment",
                properties_path.display()
            );
            None
        };

        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }
}

/// Resolved configuration for the `scan` job
#[derive(Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// API key for the scanning service
    pub api_key: String,
}

impl std::fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ScanConfig {
    /// Build the configuration from an environment lookup
    pub fn from_env<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env(SCAN_API_KEY_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| missing(SCAN_API_KEY_VAR))?;

        Ok(Self { api_key })
    }
}

fn required(values: &HashMap<String, String>, key: &str) -> Result<String> {
    values
        .get(key)
        .filter(|value| !value.is_empty())
        .cloned()
        .ok_or_else(|| missing(key).into())
}

fn missing(key: &str) -> ConfigError {
    ConfigError::MissingValue {
        key: key.to_string(),
    }
}
