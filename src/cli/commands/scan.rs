//! `scan` command: upload the release APK for security scanning.

use crate::cli::{Command, RuntimeConfig};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::scan::{self, ScanUploadClient};
use std::path::Path;

/// Execute the scan upload job
pub async fn execute_scan(command: &Command, config: &RuntimeConfig) -> Result<()> {
    let Command::Scan {
        build_version,
        project_root,
        apk,
        init_url,
    } = command
    else {
        unreachable!("execute_scan called with {}", command.name());
    };

    let output = config.output();
    output.info(&format!("Uploading app with SDK v{build_version}"));

    // A missing key must fail before any request is made
    let settings = ScanConfig::from_env(|key| std::env::var(key).ok())?;

    let apk_path = project_root.join(apk.as_deref().unwrap_or(Path::new(scan::DEFAULT_APK_PATH)));
    let client = ScanUploadClient::new(init_url)?;

    output.progress("Requesting upload URL");
    let upload_url = client.init_upload(&settings.api_key).await?;
    output.verbose(&format!("Upload URL: {upload_url}"));

    output.progress(&format!("Uploading {}", apk_path.display()));
    client
        .submit_file(&upload_url, &apk_path, &scan::upload_comment(build_version))
        .await?;

    output.success("File uploaded successfully");
    Ok(())
}
