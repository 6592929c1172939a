//! # Tally Back-Office Entry Point
//!
//! Seeds the demo store and logs a dashboard summary. The setup lives in
//! the library so tests can drive it.
//!
//! Usage: `tally-backoffice [path/to/backoffice.toml]`

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    match tally_backoffice::run(config_path).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Back-office failed to start: {}", e);
            ExitCode::FAILURE
        }
    }
}
