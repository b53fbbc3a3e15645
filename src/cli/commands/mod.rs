//! Command execution for the publishing jobs.

mod bintray;
mod scan;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use bintray::execute_bintray;
use scan::execute_scan;

/// Execute the selected command, returning the process exit code
pub async fn execute_command(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);

    if let Err(validation_error) = args.validate() {
        config.output().error(&validation_error.to_string());
        return Ok(1);
    }

    let result = match &args.command {
        Command::Bintray { .. } => execute_bintray(&args.command, &config).await,
        Command::Scan { .. } => execute_scan(&args.command, &config).await,
    };

    match result {
        Ok(()) => {
            log::debug!("Command '{}' completed", args.command.name());
            Ok(0)
        }
        Err(e) => {
            let output = config.output();
            output.error(&format!("Command '{}' failed: {}", args.command.name(), e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.error_detail("Recovery suggestions:");
                for suggestion in suggestions {
                    output.error_detail(&format!("  • {suggestion}"));
                }
            }

            Ok(1)
        }
    }
}
