//! CLI entry point for the pair spot-price tool.
//!
//! The binary owns exactly two things: runtime initialization and the
//! mapping from a failed pipeline to a non-zero exit status. Everything
//! else lives in the library:
//!
//! ```text
//! main.rs (runtime + tracing init)
//!     ↓
//! cli.rs       → argument parsing + layer orchestration
//! config.rs    → environment variables
//! registry.rs  → symbol → TokenDescriptor resolution
//! token.rs     → canonical pair ordering
//! rpc.rs       → factory lookup + reserve snapshot
//! pricing.rs   → wide-integer price normalization
//! ```
//!
//! All errors bubble up as `PriceResult<T>`; nothing below this file
//! touches the process exit status.

use pair_spot_price::{cli, observability};
use tracing::error;

/// Entry point: initialize tracing, run the CLI, map errors to exit code 1.
#[tokio::main]
async fn main() {
    // Logging configuration comes from the environment:
    // - RUST_LOG: filter directives (e.g. "debug", "pair_spot_price=trace")
    // - LOG_JSON: JSON console output ("true" or "false")
    // - LOG_FILE: write JSON logs to file with daily rotation
    let log_level = std::env::var("RUST_LOG").ok();
    let log_file = std::env::var("LOG_FILE").ok().map(std::path::PathBuf::from);
    let json_output = std::env::var("LOG_JSON")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    // The guard keeps the non-blocking file writer alive; it must live
    // until main returns or buffered file output is dropped.
    let _log_guard = match observability::init_tracing(log_level, log_file, json_output) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run().await {
        error!(error = %e, "Price query failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
