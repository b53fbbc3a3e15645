//! `bintray` command: ensure, upload and publish SDK artifacts.

use crate::artifact::{self, BuildFlavor};
use crate::bintray::BintrayClient;
use crate::cli::{Command, RuntimeConfig};
use crate::config::{ConfigSource, PublisherConfig};
use crate::error::Result;
use crate::publish::{ReleasePublisher, ReleaseStep};

/// Execute the Bintray publishing job
pub async fn execute_bintray(command: &Command, config: &RuntimeConfig) -> Result<()> {
    let Command::Bintray {
        whitelabel,
        build_version,
        project_root,
        properties,
        api_url,
    } = command
    else {
        unreachable!("execute_bintray called with {}", command.name());
    };

    let output = config.output();
    let flavor = BuildFlavor::from_white_label(*whitelabel);
    let version = artifact::resolve_version(flavor, build_version.as_deref())?;

    let settings = PublisherConfig::load(properties)?;
    match settings.source {
        ConfigSource::PropertiesFile => {
            output.verbose(&format!("Using credentials from {}", properties.display()))
        }
        ConfigSource::Environment => output.verbose("Using credentials from environment"),
    }

    let artifacts = artifact::plan(project_root, flavor, &version);
    let client = BintrayClient::new(api_url, settings.credentials.clone())?;
    let publisher = ReleasePublisher::new(&client, &settings.descriptor, &version);

    output.info(&format!(
        "Publishing {} {} to {}/{}",
        settings.descriptor.name,
        version,
        settings.credentials.organization,
        settings.credentials.repository
    ));

    let report = publisher
        .run(&artifacts, |step| match step {
            ReleaseStep::Upload(artifact) => {
                output.progress(&format!(
                    "Uploading {} {} from {}",
                    artifact.module,
                    artifact.kind,
                    artifact.local_path.display()
                ));
                output.verbose(&format!("-> {}", artifact.remote_path));
            }
            other => output.progress(&format!("Running {other}")),
        })
        .await?;

    if report.package_created {
        output.warn(&format!("Created package {}", report.package));
    }
    if report.version_created {
        output.verbose(&format!("Created version {}", report.version));
    }
    for path in &report.uploaded {
        output.indent(path);
    }
    output.success(&format!(
        "Uploaded {} files and published {} {}",
        report.uploaded.len(),
        report.package,
        report.version
    ));

    Ok(())
}
