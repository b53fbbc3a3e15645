//! Release publishing workflow.
//!
//! A release is an ordered list of [`ReleaseStep`]s executed one at a time
//! against a [`PackageRepository`](crate::bintray::PackageRepository). The
//! driver stops at the first failure; artifacts uploaded before it stay on
//! the remote side.

mod publisher;

pub use publisher::{PublishReport, ReleasePublisher, ReleaseStep};
