use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_FILTER: &str = "info,service=debug,sea_orm=warn,sqlx=warn";

fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_FILTER)))
}

/// Initialize tracing subscriber with compact output on stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to [`DEFAULT_FILTER`]
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter(None))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter(None))
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the subscriber flavour from configuration.
///
/// `level` is only used when `RUST_LOG` is absent. Calling this more than once
/// is harmless: later calls leave the first subscriber in place.
pub fn init_logging(json: bool, level: Option<&str>) {
    let filter = env_filter(level);
    let builder = fmt().with_env_filter(filter).with_writer(io::stdout);
    let _ = if json {
        builder.with_target(true).json().try_init()
    } else {
        builder.with_target(false).compact().try_init()
    };
}
