//! # Logging Initialization
//!
//! Installs the global `tracing` subscriber for the `openbel_ws` binary.
//!
//! ## Logging Configuration
//!
//! 1.  **Environment Filter (`EnvFilter`)**: `RUST_LOG` wins when set. Otherwise the
//!     filter is built from the requested level, with `debug` for this workspace's
//!     crates when the level is `debug` or finer.
//!
//! 2.  **Stderr Logging (Default)**: logs go to `stderr` so that `stdout` carries only
//!     command output (reports, CSV). ANSI colors are enabled only when stderr is a
//!     terminal.
//!
//! 3.  **File Logging (Opt-in)**: with `log_to_file = true` a daily rolling file is
//!     written to the user cache directory (from the `directories` crate) without
//!     ANSI colors. When that directory cannot be determined or written, logging
//!     falls back to stderr.
//!
//! Initialization runs once per process; later calls are no-ops.

use anyhow::Result;
use directories::ProjectDirs;
use std::io::{IsTerminal, stderr};
use std::path::Path;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::layer, prelude::*};

static INIT: Once = Once::new();

const LOG_FILE_NAME: &str = "openbel_ws.log";

/// Initialize verbose logging for tests.
///
/// This configures a `trace`-level subscriber that logs to stderr.
pub fn init_test_logging() {
    let _ = init_logging("trace", false);
}

/// Default filter directives for a log level when `RUST_LOG` is unset.
pub fn default_filter(log_level: &str) -> String {
    match log_level {
        "debug" | "trace" => format!("{log_level},openbel_ws=debug,openbel_ws_client=debug"),
        _ => log_level.to_string(),
    }
}

/// Initializes the logging system.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the call site stable if setup
/// gains fallible steps.
pub fn init_logging(log_level: &str, log_to_file: bool) -> Result<()> {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

        if log_to_file && let Some(proj_dirs) = ProjectDirs::from("org", "OpenBEL", "openbel_ws") {
            let log_dir = proj_dirs.cache_dir();

            // tracing_appender::rolling::daily panics on permission errors.
            let file_appender_result = if can_write(log_dir) {
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME)
                }))
            } else {
                Err(Box::new("Cannot write to log directory") as Box<dyn std::any::Any + Send>)
            };

            if let Ok(file_appender) = file_appender_result {
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer().with_writer(non_blocking).with_ansi(false))
                    .init();
                // Leaked so buffered lines are flushed at exit.
                Box::leak(Box::new(guard));
                return;
            }
        }

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                layer()
                    .with_writer(stderr)
                    .with_ansi(stderr().is_terminal()),
            )
            .init();
    });

    Ok(())
}

/// Create `dir` if needed and check that a file can be written into it.
pub fn can_write(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }

    let marker = dir.join(".openbel_ws_write_check");
    match std::fs::write(&marker, "ok") {
        Ok(()) => {
            let _ = std::fs::remove_file(&marker);
            true
        }
        Err(_) => false,
    }
}
