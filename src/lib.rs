//! # Release Publisher
//!
//! Release automation for the Android SDK, run by the build pipeline after
//! compilation.
//!
//! ## Jobs
//!
//! - **bintray**: ensures the Bintray package and version exist, uploads the
//!   classes jars, Android archives, POMs and Javadoc archive, then publishes
//!   the version.
//! - **scan**: uploads the release APK to the security-scanning service.
//!
//! Both jobs run their network calls strictly one after another and stop at
//! the first failure.
//!
//! ## Usage
//!
//! ```bash
//! release_publisher bintray --build-version 2.3.1
//! release_publisher bintray --whitelabel
//! DATATHEOREM_API_KEY=... release_publisher scan --build-version 2.3.1
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifact;
pub mod bintray;
pub mod cli;
pub mod config;
pub mod error;
pub mod publish;
pub mod scan;

pub use artifact::{ArtifactKind, ArtifactReference, BuildFlavor};
pub use bintray::{BintrayClient, PackageRepository};
pub use cli::Args;
pub use config::{Credentials, PublisherConfig, ReleaseDescriptor, ScanConfig};
pub use error::{ReleaseError, RemoteError, RemoteErrorKind, Result};
pub use publish::{PublishReport, ReleasePublisher, ReleaseStep};
pub use scan::ScanUploadClient;
