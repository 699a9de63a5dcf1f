//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Log output formats the server knows how to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for log shippers.
    Json,
    /// Human-readable output for local development.
    Pretty,
}

impl LogFormat {
    /// Resolve the format from `RXSTOCK_LOG_FORMAT` (`json` or `pretty`).
    /// Unset or unrecognized values fall back to JSON.
    pub fn from_env() -> Self {
        match std::env::var("RXSTOCK_LOG_FORMAT").as_deref() {
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Filtering comes from `RUST_LOG` (default `info`); output format from
/// `RXSTOCK_LOG_FORMAT`. Safe to call multiple times (subsequent calls are
/// no-ops).
pub fn init() {
    init_with_format(LogFormat::from_env());
}

fn init_with_format(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_env_defaults_to_json() {
        // Runs without RXSTOCK_LOG_FORMAT set in CI.
        if std::env::var("RXSTOCK_LOG_FORMAT").is_err() {
            assert_eq!(LogFormat::from_env(), LogFormat::Json);
        }
    }

    #[test]
    fn init_twice_is_a_no_op() {
        init();
        init();
    }
}
