//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Environment variable holding per-module log directives.
pub const LOG_ENV: &str = "FLORA_LOG";

/// Initialize the Flora tracing/logging system.
///
/// Reads `FLORA_LOG` for per-module log levels, e.g.
/// `FLORA_LOG=flora_effects=debug,flora_core=warn`.
///
/// Falls back to `flora=<default_level>` if `FLORA_LOG` is not set or is
/// invalid. Idempotent: only the first call installs a subscriber.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let directives = std::env::var(LOG_ENV).ok();
        let filter = build_filter(directives.as_deref(), default_level);

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Filter for `directives` in `EnvFilter` syntax. Missing, blank or
/// unparseable directives fall back to `flora=<default_level>`.
pub fn build_filter(directives: Option<&str>, default_level: &str) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("flora={default_level}")))
}

/// [`init_tracing`] with the configured `observability.log_level` as the
/// fallback level.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    init_tracing(&config.log_level);
}
