//! Structured logging setup built on the tracing framework.
//!
//! Console output is pretty-printed for development or JSON for log
//! aggregation; an optional file layer writes JSON with daily rotation.
//! Filtering follows the `RUST_LOG` environment variable.
//!
//! ```bash
//! RUST_LOG=pair_spot_price=debug cargo run -- -A WBTC -B WETH
//! LOG_JSON=true LOG_FILE=./logs/price.log cargo run -- -A WBTC -B WETH
//! ```

use eyre::WrapErr;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber.
///
/// Returns the [`WorkerGuard`] for the file layer when one was
/// configured. The caller must hold it for the life of the process:
/// dropping it shuts down the background writer and any buffered file
/// output is lost.
///
/// # Arguments
///
/// * `log_level` - Optional filter directive override; falls back to
///   `RUST_LOG`, then to `pair_spot_price=info,warn`.
/// * `log_file` - Optional file path; enables a JSON layer with daily
///   rotation alongside the console output.
/// * `json_output` - JSON console format instead of the pretty one.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the
/// subscriber fails to install (e.g. a second initialization).
pub fn init_tracing(
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    json_output: bool,
) -> eyre::Result<Option<WorkerGuard>> {
    let env_filter = if let Ok(filter) = std::env::var("RUST_LOG") {
        EnvFilter::new(filter)
    } else if let Some(level) = log_level {
        EnvFilter::new(level)
    } else {
        // Default: info for this crate, warn for dependencies
        EnvFilter::new("pair_spot_price=info,warn")
    };

    let console_layer = if json_output {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().pretty().with_target(true).boxed()
    };

    let (file_layer, guard) = if let Some(ref path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create log directory for {}", path.display()))?;
        }

        let file_appender = tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_name().unwrap_or_else(|| OsStr::new("price.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // File output is always JSON for structured analysis
        (
            Some(fmt::layer().json().with_writer(non_blocking).boxed()),
            Some(guard),
        )
    } else {
        (None, None)
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(file) = file_layer {
        subscriber
            .with(file)
            .try_init()
            .wrap_err("failed to install tracing subscriber")?;
    } else {
        subscriber
            .try_init()
            .wrap_err("failed to install tracing subscriber")?;
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber can only be installed once per process, so these
    // verify initialization behavior without asserting which call wins.

    #[test]
    fn test_init_tracing_default() {
        let result = init_tracing(None, None, false);
        if let Ok(guard) = result {
            // No file layer configured, so no writer guard to hold.
            assert!(guard.is_none());
        }
    }

    #[test]
    fn test_init_tracing_json() {
        let result = init_tracing(Some("info".to_string()), None, true);
        if let Ok(guard) = result {
            assert!(guard.is_none());
        }
    }

    #[test]
    fn test_file_layer_hands_back_writer_guard() {
        let dir = tempfile::tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let path = dir.path().join("price.log");
            let result = init_tracing(Some("info".to_string()), Some(path), false);
            // When this call installs the subscriber, the caller must
            // receive the guard that keeps the background writer alive.
            if let Ok(guard) = result {
                assert!(guard.is_some());
            }
        }
    }
}
