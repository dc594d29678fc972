//! Client configuration
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Main client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Authentication token presented in Identify/Resume
    pub token: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    #[serde(default)]
    pub gateway: GatewaySettings,
}

/// Gateway connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySettings {
    /// Websocket endpoint URL
    #[serde(default = "default_gateway_url")]
    pub url: String,
    /// Requested intent bitmask (raw bits)
    #[serde(default = "default_intents")]
    pub intents: u64,
    /// Maximum reconnect attempts before surfacing a terminal error
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,
    /// Base reconnect backoff delay in milliseconds
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
    /// Reconnect backoff cap in milliseconds
    #[serde(default = "default_backoff_cap_ms")]
    pub backoff_cap_ms: u64,
    /// How long to wait for Hello / Ready before treating the attempt as failed
    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,
}

impl GatewaySettings {
    /// Hello/Ready wait deadline
    #[must_use]
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            url: default_gateway_url(),
            intents: default_intents(),
            max_reconnect_attempts: default_max_reconnect_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_cap_ms: default_backoff_cap_ms(),
            handshake_timeout_ms: default_handshake_timeout_ms(),
        }
    }
}

// Default value functions
fn default_env() -> Environment {
    Environment::Development
}

fn default_gateway_url() -> String {
    "wss://gateway.example.chat/?v=1&encoding=json".to_string()
}

fn default_intents() -> u64 {
    // guilds + guild messages + direct messages
    0b111
}

fn default_max_reconnect_attempts() -> u32 {
    10
}

fn default_backoff_base_ms() -> u64 {
    1_000
}

fn default_backoff_cap_ms() -> u64 {
    60_000
}

fn default_handshake_timeout_ms() -> u64 {
    30_000
}

impl ClientConfig {
    /// Create a config with just a token, defaults for everything else
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            env: Environment::default(),
            gateway: GatewaySettings::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `ACCORD_TOKEN` is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            token: env::var("ACCORD_TOKEN").map_err(|_| ConfigError::MissingVar("ACCORD_TOKEN"))?,
            env: env::var("ACCORD_ENV")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "production" => Some(Environment::Production),
                    "staging" => Some(Environment::Staging),
                    "development" => Some(Environment::Development),
                    _ => None,
                })
                .unwrap_or_default(),
            gateway: GatewaySettings {
                url: env::var("ACCORD_GATEWAY_URL").unwrap_or_else(|_| default_gateway_url()),
                intents: env::var("ACCORD_INTENTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_intents),
                max_reconnect_attempts: env::var("ACCORD_MAX_RECONNECT_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_reconnect_attempts),
                backoff_base_ms: env::var("ACCORD_BACKOFF_BASE_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_backoff_base_ms),
                backoff_cap_ms: env::var("ACCORD_BACKOFF_CAP_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_backoff_cap_ms),
                handshake_timeout_ms: env::var("ACCORD_HANDSHAKE_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_handshake_timeout_ms),
            },
        })
    }
}

/// Configuration load errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("token");
        assert_eq!(config.gateway.max_reconnect_attempts, 10);
        assert_eq!(config.gateway.backoff_base_ms, 1_000);
        assert!(config.env.is_development());
    }

    #[test]
    fn test_handshake_timeout_duration() {
        let settings = GatewaySettings::default();
        assert_eq!(settings.handshake_timeout(), Duration::from_secs(30));
    }
}
