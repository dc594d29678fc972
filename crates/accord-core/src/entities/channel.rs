//! Channel entity - one structurally typed record with a kind tag
//!
//! The platform models text/voice/category/DM channels as a hierarchy of
//! overlapping shapes; here they collapse into a single `Channel` with a
//! `ChannelKind` discriminator plus capability helpers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::User;
use crate::value_objects::Snowflake;

/// Channel kind discriminator (wire field `type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelKind {
    /// Guild text channel
    #[default]
    Text,
    /// Direct message between users
    Dm,
    /// Guild voice channel
    Voice,
    /// Group direct message
    GroupDm,
    /// Category grouping guild channels
    Category,
    /// Guild announcement channel
    News,
    /// Guild store channel
    Store,
    /// Forward-compatible catch-all for kinds this library predates
    Unknown(u8),
}

impl ChannelKind {
    /// Create a `ChannelKind` from the raw wire value
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Text,
            1 => Self::Dm,
            2 => Self::Voice,
            3 => Self::GroupDm,
            4 => Self::Category,
            5 => Self::News,
            6 => Self::Store,
            other => Self::Unknown(other),
        }
    }

    /// Get the raw wire value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Text => 0,
            Self::Dm => 1,
            Self::Voice => 2,
            Self::GroupDm => 3,
            Self::Category => 4,
            Self::News => 5,
            Self::Store => 6,
            Self::Unknown(other) => other,
        }
    }
}

impl Serialize for ChannelKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for ChannelKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Ok(Self::from_u8(value))
    }
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    #[serde(rename = "type", default)]
    pub kind: ChannelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u32>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Snowflake>,
}

impl Channel {
    /// Create a guild text channel
    #[must_use]
    pub fn new_text(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            kind: ChannelKind::Text,
            guild_id: Some(guild_id),
            name: Some(name.into()),
            topic: None,
            position: None,
            parent_id: None,
            last_message_id: None,
            bitrate: None,
            user_limit: None,
            rate_limit_per_user: None,
            nsfw: false,
            recipients: Vec::new(),
            owner_id: None,
        }
    }

    /// Create a DM channel
    #[must_use]
    pub fn new_dm(id: Snowflake, recipients: Vec<User>) -> Self {
        Self {
            id,
            kind: ChannelKind::Dm,
            guild_id: None,
            name: None,
            topic: None,
            position: None,
            parent_id: None,
            last_message_id: None,
            bitrate: None,
            user_limit: None,
            rate_limit_per_user: None,
            nsfw: false,
            recipients,
            owner_id: None,
        }
    }

    /// Create a guild voice channel
    #[must_use]
    pub fn new_voice(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            kind: ChannelKind::Voice,
            ..Self::new_text(id, guild_id, name)
        }
    }

    /// Channels that can carry messages
    #[inline]
    pub fn is_message_capable(&self) -> bool {
        matches!(
            self.kind,
            ChannelKind::Text | ChannelKind::News | ChannelKind::Dm | ChannelKind::GroupDm
        )
    }

    /// Channels that can carry voice
    #[inline]
    pub fn is_voice_capable(&self) -> bool {
        matches!(self.kind, ChannelKind::Voice)
    }

    /// Channels owned by a guild (as opposed to DMs)
    #[inline]
    pub fn is_guild_channel(&self) -> bool {
        self.guild_id.is_some()
    }

    /// Category channels group other guild channels
    #[inline]
    pub fn is_category(&self) -> bool {
        matches!(self.kind, ChannelKind::Category)
    }
}
