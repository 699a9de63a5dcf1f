//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the API server.
///
/// Everything comes from the environment:
/// - `RXSTOCK_ADDR`: listen address (default `0.0.0.0:8080`)
/// - `RXSTOCK_SNAPSHOT`: snapshot file path; unset disables persistence
/// - `RXSTOCK_CONFIRM_DELAY_MS`: pending-to-confirmed delay (default 2000)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub snapshot_path: Option<PathBuf>,
    pub confirmation_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".parse().unwrap(),
            snapshot_path: None,
            confirmation_delay: Duration::from_millis(2000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let addr = match std::env::var("RXSTOCK_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(raw, "RXSTOCK_ADDR did not parse; using default");
                defaults.addr
            }),
            Err(_) => defaults.addr,
        };

        let snapshot_path = std::env::var("RXSTOCK_SNAPSHOT").ok().map(PathBuf::from);

        let confirmation_delay = match std::env::var("RXSTOCK_CONFIRM_DELAY_MS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(raw, "RXSTOCK_CONFIRM_DELAY_MS did not parse; using default");
                    defaults.confirmation_delay
                }
            },
            Err(_) => defaults.confirmation_delay,
        };

        Self {
            addr,
            snapshot_path,
            confirmation_delay,
        }
    }
}
