//! Configuration module for chatrelay.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::{RelayError, Result};

/// Coordinator listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    12345
}

impl ServerConfig {
    /// Address string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address participants should dial.
    ///
    /// A wildcard bind host is replaced with the loopback address.
    pub fn connect_addr(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "" => "127.0.0.1",
            "::" => "::1",
            other => other,
        };
        format!("{}:{}", host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Fan-out dispatcher configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Maximum number of events waiting for broadcast before producers block.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Connect timeout for a single delivery, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total timeout for a single delivery call, in seconds.
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_secs: u64,
}

fn default_queue_capacity() -> usize {
    100
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_delivery_timeout() -> u64 {
    10
}

impl DispatchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            connect_timeout_secs: default_connect_timeout(),
            delivery_timeout_secs: default_delivery_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional path to a log file. Console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Participant display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Timezone for rendering event timestamps (e.g., "UTC", "Asia/Tokyo").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Coordinator listener configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Fan-out configuration.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Participant display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RelayError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CHATRELAY_HOST`: Override the listen host
    /// - `CHATRELAY_PORT`: Override the listen port (ignored if not a valid port)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CHATRELAY_HOST") {
            if !host.is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = std::env::var("CHATRELAY_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.dispatch.queue_capacity == 0 {
            return Err(RelayError::Config(
                "dispatch.queue_capacity must be greater than zero".to_string(),
            ));
        }
        if self.dispatch.connect_timeout_secs == 0 || self.dispatch.delivery_timeout_secs == 0 {
            return Err(RelayError::Config(
                "dispatch timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 12345);

        assert_eq!(config.dispatch.queue_capacity, 100);
        assert_eq!(config.dispatch.connect_timeout_secs, 5);
        assert_eq!(config.dispatch.delivery_timeout_secs, 10);

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());

        assert_eq!(config.display.timezone, "UTC");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 4000

[dispatch]
queue_capacity = 16
connect_timeout_secs = 2
delivery_timeout_secs = 3

[logging]
level = "debug"
file = "logs/relay.log"

[display]
timezone = "Asia/Tokyo"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.dispatch.queue_capacity, 16);
        assert_eq!(config.dispatch.connect_timeout(), Duration::from_secs(2));
        assert_eq!(config.dispatch.delivery_timeout(), Duration::from_secs(3));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("logs/relay.log"));
        assert_eq!(config.display.timezone, "Asia/Tokyo");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 5555
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5555);
        assert_eq!(config.dispatch.queue_capacity, 100);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 12345);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("[server]\nport = \"not a number\"");
        assert!(matches!(result, Err(RelayError::Config(_))));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let mut config = Config::default();
        config.dispatch.queue_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.dispatch.delivery_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_connect_addr_replaces_wildcard() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_addr(), "0.0.0.0:12345");
        assert_eq!(server.connect_addr(), "127.0.0.1:12345");

        let server = ServerConfig {
            host: "10.0.0.5".to_string(),
            port: 80,
        };
        assert_eq!(server.connect_addr(), "10.0.0.5:80");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("does/not/exist.toml");
        assert!(matches!(result, Err(RelayError::Io(_))));
    }
}
