//! Client-facing error type
//!
//! Unified error surface for everything the owning client can fail on.

use accord_core::DomainError;

use crate::config::ConfigError;

/// Client-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Connection errors
    #[error("gateway connection failed: {0}")]
    Connection(String),

    #[error("authentication rejected by the gateway")]
    AuthenticationFailed,

    #[error("reconnect attempts exhausted after {attempts} tries")]
    ReconnectExhausted { attempts: u32 },

    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Internal errors
    #[error("internal client error")]
    Internal(#[source] anyhow::Error),
}

impl ClientError {
    /// Terminal errors require an explicit reconnect by the caller
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed | Self::ReconnectExhausted { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(ClientError::AuthenticationFailed.is_terminal());
        assert!(ClientError::ReconnectExhausted { attempts: 5 }.is_terminal());
        assert!(!ClientError::Connection("reset".to_string()).is_terminal());
    }
}
