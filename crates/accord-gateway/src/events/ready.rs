//! Handshake and connectivity events

use crate::connection::ConnectionStatus;
use accord_core::{Guild, User};

/// Fired once the server acknowledges a fresh Identify
#[derive(Debug, Clone)]
pub struct ReadyEvent {
    /// Session id to use for later Resume attempts
    pub session_id: String,
    /// The authenticated user
    pub user: User,
    /// Guild stubs the user belongs to (filled in by GUILD_CREATE later)
    pub guilds: Vec<Guild>,
}

/// Fired when the connection manager changes lifecycle state
///
/// This is the only way transient reconnects are visible to listeners.
#[derive(Debug, Clone)]
pub struct StatusChangeEvent {
    pub previous: ConnectionStatus,
    pub current: ConnectionStatus,
}
