//! Tracing initialization and span definitions.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV};

static INIT: Once = Once::new();

/// Initialize the SES tracing/logging system.
///
/// Reads the `SES_LOG` environment variable for per-module log levels.
/// Format: `SES_LOG=ses_delivery=debug,ses_clock=info`
///
/// Falls back to `ses=info` if `SES_LOG` is not set or is invalid.
///
/// This function is idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    install(filter, false);
}

/// Initialize tracing from a [`LoggingConfig`] (for embedding and tests).
///
/// An unparseable filter falls back to `ses=info`.
pub fn init_tracing_with_config(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    install(filter, config.json);
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        // A subscriber installed elsewhere (e.g. by a test harness) wins.
        let _ = if json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
        };
    });
}
