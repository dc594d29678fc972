//! # accord-core
//!
//! Domain layer containing entities, value objects, and the wire shapes the
//! gateway delivers them in. This crate has zero dependencies on transport
//! or caching infrastructure.

pub mod entities;
pub mod error;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActionRow, ApplicationCommand, Button, Channel, ChannelKind, CommandOption, CommandOptionKind, Component,
    ComponentKind, ComponentPayload, Emote, Guild, GuildMember, Interaction, InteractionData,
    InteractionKind, Message, OptionData, Reaction, ResolvedData, Role, User, VoiceState,
};
pub use error::DomainError;
pub use value_objects::{Permissions, Snowflake, SnowflakeParseError};
