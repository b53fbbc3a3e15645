//! Command line interface for release_publisher.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::{CliError, Result};
use clap::error::ErrorKind;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(CliError::Parse(e)) => {
            // help and version requests arrive here too and go to stdout
            let _ = e.print();
            return Ok(parse_exit_code(e.kind()));
        }
        Err(other) => return Err(other.into()),
    };
    execute_command(args).await
}

/// Exit code for a command line that did not parse into [`Args`].
///
/// Help and version output succeed; every real parse failure exits 1 like
/// any other failed run.
pub fn parse_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
