//! Release Publisher - uploads SDK artifacts and release APKs from CI.

use release_publisher::cli;
use release_publisher::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));
            for suggestion in e.recovery_suggestions() {
                output.error_detail(&suggestion);
            }
            process::exit(1);
        }
    }
}
