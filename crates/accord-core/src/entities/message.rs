//! Message entity - a chat message as delivered on the wire

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ComponentPayload, GuildMember, Reaction, User};
use crate::value_objects::Snowflake;

/// Message entity
///
/// Identity within the cache is the pair (channel_id, id); MESSAGE_DELETE
/// carries both halves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
}

impl Message {
    /// Create a Message with required fields
    pub fn new(id: Snowflake, channel_id: Snowflake, content: impl Into<String>) -> Self {
        Self {
            id,
            channel_id,
            guild_id: None,
            author: None,
            member: None,
            content: content.into(),
            timestamp: None,
            edited_timestamp: None,
            components: Vec::new(),
            reactions: Vec::new(),
        }
    }

    /// Check if message has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_timestamp.is_some()
    }

    /// Check if the message was sent in a guild channel
    #[inline]
    pub fn from_guild(&self) -> bool {
        self.guild_id.is_some()
    }

    /// When the message was created: explicit timestamp if present,
    /// otherwise derived from the snowflake
    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or_else(|| self.id.created_at())
    }
}
