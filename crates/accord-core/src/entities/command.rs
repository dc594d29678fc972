//! Application command entity - a registered slash command

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Option kind tags for command options (wire field `type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(into = "u8", try_from = "u8")]
pub enum CommandOptionKind {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
}

impl From<CommandOptionKind> for u8 {
    fn from(kind: CommandOptionKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for CommandOptionKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::SubCommand),
            2 => Ok(Self::SubCommandGroup),
            3 => Ok(Self::String),
            4 => Ok(Self::Integer),
            5 => Ok(Self::Boolean),
            6 => Ok(Self::User),
            7 => Ok(Self::Channel),
            8 => Ok(Self::Role),
            other => Err(format!("unknown command option type: {other}")),
        }
    }
}

/// A declared option on an application command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: CommandOptionKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

/// Application command entity
///
/// Global commands carry no `guild_id`; guild commands are scoped to one.
/// Ids are globally unique either way, so the cache keys both by id alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCommand {
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

impl ApplicationCommand {
    /// Create a global command
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            application_id: None,
            guild_id: None,
            name: name.into(),
            description: String::new(),
            options: Vec::new(),
        }
    }

    /// Check whether this command is scoped to a guild
    #[inline]
    pub fn from_guild(&self) -> bool {
        self.guild_id.is_some()
    }
}
