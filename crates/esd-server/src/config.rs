//! Configuration for the monitor server.
//!
//! All configuration is loaded from environment variables with defaults
//! that match the deployed sensor bridge (port 6789, 30 s liveness
//! probes).

use std::time::Duration;

use esd_observer::DEFAULT_SWEEP_PERIOD;

/// Complete server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// The host address to bind to.
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
    /// How often the liveness sweep probes observer connections.
    pub sweep_period: Duration,
}

/// A configuration value could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value of the wrong type.
    #[error("config error: {0}")]
    Invalid(String),
}

impl MonitorConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `ESD_HOST` -- bind address (default `0.0.0.0`)
    /// - `ESD_PORT` -- listen port (default `6789`)
    /// - `ESD_SWEEP_INTERVAL_SECS` -- liveness probe period (default `30`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("ESD_HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());

        let port: u16 = std::env::var("ESD_PORT")
            .unwrap_or_else(|_| "6789".to_owned())
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("invalid ESD_PORT: {e}")))?;

        let sweep_period = match std::env::var("ESD_SWEEP_INTERVAL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    ConfigError::Invalid(format!("invalid ESD_SWEEP_INTERVAL_SECS: {e}"))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_SWEEP_PERIOD,
        };

        Ok(Self {
            host,
            port,
            sweep_period,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_bridge() {
        // Verify default values used in from_env fallbacks.
        let port_default: u16 = "6789".parse().unwrap_or(0);
        assert_eq!(port_default, 6789);

        assert_eq!(DEFAULT_SWEEP_PERIOD, Duration::from_secs(30));
    }
}
