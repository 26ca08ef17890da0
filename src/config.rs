//! Server configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (8080), DRAW_CSV (optional draw file),
//! SIM_DELAY_MS (600), SIM_CONCURRENCY (4).

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Draw to load instead of the built-in one.
    pub draw_csv: Option<PathBuf>,
    /// Delay before a basic simulation resolves.
    pub simulation_delay: Duration,
    /// Maximum simultaneous match simulations.
    pub simulation_concurrency: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_simulation_delay_ms() -> u64 {
    600
}

fn default_simulation_concurrency() -> usize {
    4
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            draw_csv: None,
            simulation_delay: Duration::from_millis(default_simulation_delay_ms()),
            simulation_concurrency: default_simulation_concurrency(),
        }
    }
}

impl ServerConfig {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`; unset or unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let draw_csv = lookup("DRAW_CSV")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let delay_ms = lookup("SIM_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_simulation_delay_ms);
        let simulation_concurrency = lookup("SIM_CONCURRENCY")
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or_else(default_simulation_concurrency);
        Self {
            host,
            port,
            draw_csv,
            simulation_delay: Duration::from_millis(delay_ms),
            simulation_concurrency,
        }
    }
}
