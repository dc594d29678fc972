//! Interaction entity - an incoming slash-command or component invocation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::{Channel, CommandOptionKind, GuildMember, Role, User};
use crate::value_objects::Snowflake;

/// Interaction kind (wire field `type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(into = "u8", try_from = "u8")]
pub enum InteractionKind {
    Ping = 1,
    ApplicationCommand = 2,
    Component = 3,
}

impl From<InteractionKind> for u8 {
    fn from(kind: InteractionKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for InteractionKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ping),
            2 => Ok(Self::ApplicationCommand),
            3 => Ok(Self::Component),
            other => Err(format!("unknown interaction type: {other}")),
        }
    }
}

/// Entities the platform resolved out of command arguments
///
/// Channels in this block are partial objects; they lack fields a full
/// `Channel` materialization requires and are never written to the cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedData {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub users: HashMap<Snowflake, User>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub members: HashMap<Snowflake, GuildMember>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub roles: HashMap<Snowflake, Role>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub channels: HashMap<Snowflake, Channel>,
}

/// A supplied option value (command arguments, possibly nested)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandOptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionData>,
}

impl OptionData {
    /// The option value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(|v| v.as_str())
    }

    /// The option value as a snowflake (User/Channel/Role options carry ids)
    pub fn as_snowflake(&self) -> Option<Snowflake> {
        self.as_str().and_then(|s| Snowflake::parse(s).ok())
    }
}

/// Command- or component-specific interaction data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<u8>,
}

/// Interaction entity
///
/// Guild invocations carry `member`, DM invocations carry `user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
}

impl Interaction {
    /// The invoking user, whether it came through `member` or `user`
    pub fn invoking_user(&self) -> Option<&User> {
        self.user
            .as_ref()
            .or_else(|| self.member.as_ref().and_then(|m| m.user.as_ref()))
    }

    /// Check whether this interaction was invoked in a guild
    #[inline]
    pub fn from_guild(&self) -> bool {
        self.guild_id.is_some()
    }
}
