//! Command line argument parsing and validation.

use crate::config::{DEFAULT_BINTRAY_API_URL, DEFAULT_PROPERTIES_FILE, DEFAULT_SCAN_INIT_URL};
use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Release automation for SDK artifacts and release APKs
#[derive(Parser, Debug)]
#[command(
    name = "release_publisher",
    version,
    about = "Publish SDK artifacts to Bintray and upload release APKs for scanning",
    long_about = "Release automation run by the build pipeline after compilation.

Usage:
  release_publisher bintray --build-version 2.3.1
  release_publisher bintray --whitelabel
  release_publisher scan --build-version 2.3.1"
)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Show detailed progress
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available jobs
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload SDK artifacts to Bintray and publish the version
    Bintray {
        /// Publish the white-label build (always version 1.0.0)
        #[arg(long)]
        whitelabel: bool,

        /// Version to publish
        #[arg(long = "build-version", value_name = "VERSION")]
        build_version: Option<String>,

        /// Repository root containing the build outputs
        #[arg(long, value_name = "DIR", default_value = ".")]
        project_root: PathBuf,

        /// Properties file taking precedence over the environment
        #[arg(long, value_name = "FILE", default_value = DEFAULT_PROPERTIES_FILE)]
        properties: PathBuf,

        /// Bintray API base URL
        #[arg(long, env = "BINTRAY_API_URL", default_value = DEFAULT_BINTRAY_API_URL)]
        api_url: String,
    },

    /// Upload the release APK to the security-scanning service
    Scan {
        /// SDK version the APK was built with
        #[arg(long = "build-version", value_name = "VERSION")]
        build_version: String,

        /// Repository root containing the build outputs
        #[arg(long, value_name = "DIR", default_value = ".")]
        project_root: PathBuf,

        /// APK to upload, relative to the project root
        #[arg(long, value_name = "FILE")]
        apk: Option<PathBuf>,

        /// Upload-init endpoint
        #[arg(long, env = "DATATHEOREM_UPLOAD_INIT_URL", default_value = DEFAULT_SCAN_INIT_URL)]
        init_url: String,
    },
}

impl Command {
    /// Get command name for display
    pub fn name(&self) -> &'static str {
        match self {
            Command::Bintray { .. } => "bintray",
            Command::Scan { .. } => "scan",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn try_parse_args() -> Result<Self, CliError> {
        Ok(Self::try_parse()?)
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        let reason = match &self.command {
            Command::Bintray {
                whitelabel: false,
                build_version,
                ..
            } if build_version.as_deref().is_none_or(str::is_empty) => {
                "--build-version is required unless --whitelabel is set"
            }
            Command::Scan { build_version, .. } if build_version.is_empty() => {
                "--build-version must not be empty"
            }
            _ => return Ok(()),
        };
        Err(CliError::InvalidArguments {
            reason: reason.to_string(),
        })
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}
