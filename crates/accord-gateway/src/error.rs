//! Gateway error types

use crate::protocol::CloseCode;

/// Errors surfaced by the gateway connection manager
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// WebSocket transport failure
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// Server rejected the token during Identify
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Server closed the connection with a gateway close code
    #[error("connection closed: {0}")]
    Closed(CloseCode),

    /// Heartbeat ack did not arrive within one interval
    #[error("missed heartbeat acknowledgment")]
    HeartbeatTimeout,

    /// Server sent a Reconnect control frame
    #[error("server requested reconnect")]
    ReconnectRequested,

    /// Hello or READY did not arrive within the handshake timeout
    #[error("gateway handshake timed out")]
    HandshakeTimeout,

    /// Reconnect attempt limit reached
    #[error("reconnect attempts exhausted after {attempts} tries")]
    ReconnectExhausted { attempts: u32 },

    /// Frame (de)serialization failure
    #[error("frame decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Operation requires a live connection
    #[error("gateway is not connected")]
    NotConnected,
}

impl GatewayError {
    /// Check if the session may survive this error via reconnect/resume
    #[must_use]
    pub fn is_resumable(&self) -> bool {
        match self {
            Self::Transport(_)
            | Self::HeartbeatTimeout
            | Self::ReconnectRequested
            | Self::HandshakeTimeout => true,
            Self::Closed(code) => code.is_resumable(),
            Self::AuthenticationFailed
            | Self::ReconnectExhausted { .. }
            | Self::Decode(_)
            | Self::NotConnected => false,
        }
    }
}
