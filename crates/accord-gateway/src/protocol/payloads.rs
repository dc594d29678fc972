//! Gateway payload definitions
//!
//! Structures carried in the `d` field of protocol frames, both
//! directions.

use accord_core::{Guild, Snowflake, User};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Gateway intent bitmask requested during Identify
    ///
    /// Controls which dispatch event families the server sends.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Intents: u64 {
        const GUILDS = 1 << 0;
        const GUILD_MEMBERS = 1 << 1;
        const GUILD_EMOTES = 1 << 3;
        const GUILD_VOICE_STATES = 1 << 7;
        const GUILD_MESSAGES = 1 << 9;
        const DIRECT_MESSAGES = 1 << 12;
    }
}

impl Intents {
    /// Intents that do not require special approval
    #[must_use]
    pub fn unprivileged() -> Self {
        Self::GUILDS | Self::GUILD_MESSAGES | Self::DIRECT_MESSAGES
    }
}

impl Default for Intents {
    fn default() -> Self {
        Self::unprivileged()
    }
}

/// Payload for op 10 (Hello)
///
/// First frame the server sends after the socket opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval: u64,
}

impl HelloPayload {
    /// Create a Hello payload with the given interval
    #[must_use]
    pub fn new(heartbeat_interval: u64) -> Self {
        Self { heartbeat_interval }
    }
}

/// Client connection properties sent with Identify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionProperties {
    /// Operating system identifier
    pub os: String,
    /// Library name
    pub browser: String,
    /// Device name
    pub device: String,
}

impl Default for ConnectionProperties {
    fn default() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            browser: "accord".to_string(),
            device: "accord".to_string(),
        }
    }
}

/// Payload for op 2 (Identify)
///
/// Authenticates a fresh session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyPayload {
    /// Authentication token
    pub token: String,

    /// Client properties
    pub properties: ConnectionProperties,

    /// Requested intent bitmask
    pub intents: u64,
}

impl IdentifyPayload {
    /// Create an Identify payload with default connection properties
    #[must_use]
    pub fn new(token: impl Into<String>, intents: Intents) -> Self {
        Self {
            token: token.into(),
            properties: ConnectionProperties::default(),
            intents: intents.bits(),
        }
    }
}

/// Payload for op 6 (Resume)
///
/// Replays a dropped session from the last acknowledged sequence number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumePayload {
    /// Authentication token
    pub token: String,

    /// Session ID to resume
    pub session_id: String,

    /// Last received sequence number
    pub seq: u64,
}

/// Payload of the READY dispatch event
///
/// Confirms a fresh Identify and carries the session identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyPayload {
    /// Gateway protocol version
    #[serde(default)]
    pub v: u8,

    /// The authenticated user
    pub user: User,

    /// Session ID used for later Resume attempts
    pub session_id: String,

    /// Guilds the user belongs to (unavailable stubs on the wire)
    #[serde(default)]
    pub guilds: Vec<Guild>,
}

/// Payload for op 3 (Presence Update)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceUpdatePayload {
    /// New status (online, idle, dnd, offline)
    pub status: String,

    /// Whether the client is marked AFK
    #[serde(default)]
    pub afk: bool,
}

impl PresenceUpdatePayload {
    /// Valid status values
    pub const VALID_STATUSES: &'static [&'static str] = &["online", "idle", "dnd", "offline"];

    /// Create a presence update with the given status
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            afk: false,
        }
    }

    /// Check if the status is a recognized value
    #[must_use]
    pub fn is_valid_status(&self) -> bool {
        Self::VALID_STATUSES.contains(&self.status.as_str())
    }
}

/// Payload for op 4 (Voice State Update)
///
/// `channel_id: None` means disconnect from voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceStateUpdatePayload {
    pub guild_id: Snowflake,
    pub channel_id: Option<Snowflake>,
    #[serde(default)]
    pub self_mute: bool,
    #[serde(default)]
    pub self_deaf: bool,
}

/// Payload for op 8 (Request Guild Members)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestGuildMembersPayload {
    pub guild_id: Snowflake,

    /// Username prefix filter; empty string requests all members
    #[serde(default)]
    pub query: String,

    /// Maximum members to return; 0 means no limit
    #[serde(default)]
    pub limit: u32,
}

impl RequestGuildMembersPayload {
    /// Request every member of a guild
    #[must_use]
    pub fn all(guild_id: Snowflake) -> Self {
        Self {
            guild_id,
            query: String::new(),
            limit: 0,
        }
    }
}
