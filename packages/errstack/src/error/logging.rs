//! Error reporting through the `log` facade
//!
//! Provides env_logger-based initialisation for binaries and tests, and
//! helpers that emit an error's message or full report at the right level.

use super::types::Error;
use log::{debug, error, info, warn};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging helpers for [`Error`] values
pub struct Reporter;

impl Reporter {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=errstack=trace` - Also log stack captures and upgrades
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            match env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .try_init()
            {
                Ok(()) => info!("Structured logging initialized"),
                Err(e) => debug!("Keeping already installed logger: {e}"),
            }
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the full report, stack included, at error level
    pub fn log_error(err: &Error) {
        error!("{err:?}");
    }

    /// Log the annotated message at warn level
    pub fn log_warning(err: &Error) {
        warn!("{err}");
    }

    /// Log an error that is being dropped on purpose, with where it happened
    pub fn log_discarded(operation: &str, err: &Error) {
        debug!("Discarded error in {operation}: {err}");
    }
}

/// Log an [`Error`] at the given level: `ERROR` and `WARN` as in [`Reporter`]
#[macro_export]
macro_rules! report {
    (ERROR, $err:expr) => {
        $crate::Reporter::log_error(&$err)
    };
    (WARN, $err:expr) => {
        $crate::Reporter::log_warning(&$err)
    };
    (DEBUG, $operation:expr, $err:expr) => {
        $crate::Reporter::log_discarded($operation, &$err)
    };
}
