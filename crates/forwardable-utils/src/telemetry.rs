use std::sync::OnceLock;

use tracing_log::LogTracer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "warn";

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Build the filter from `RUST_LOG`, falling back to `default_directive`.
fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Setup logging for a process hosting delegators
///
/// # Behavior
/// - Bridges `log` records (the core crate logs through `log`) into `tracing`
/// - Installs a fmt layer filtered by `RUST_LOG`, or by `default_directive`
///   when `RUST_LOG` is not set
/// - Only the first call installs anything; later calls return the outcome of
///   the first one
///
/// # Returns
/// `true` if this process now has our subscriber as its global default,
/// `false` if another logger or subscriber was already installed
pub fn setup_logging(default_directive: &str) -> bool {
    *INSTALLED.get_or_init(|| {
        if let Err(e) = LogTracer::init() {
            eprintln!("log bridge not installed: {e}");
            return false;
        }

        let subscriber = Registry::default()
            .with(env_filter(default_directive))
            .with(fmt::layer().with_target(true).with_test_writer());

        match tracing::subscriber::set_global_default(subscriber) {
            Ok(()) => {
                log::debug!("logging initialized");
                true
            }
            Err(e) => {
                eprintln!("tracing subscriber not installed: {e}");
                false
            }
        }
    })
}
