//! Message reaction events

use super::EntityAction;
use accord_core::{Emote, Snowflake};

/// Generic "a reaction changed" event
#[derive(Debug, Clone)]
pub struct GenericReactionEvent {
    pub action: EntityAction,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub guild_id: Option<Snowflake>,
}

/// A user added a reaction to a message
#[derive(Debug, Clone)]
pub struct ReactionAddEvent {
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub emote: Emote,
}

/// A user removed their reaction from a message
#[derive(Debug, Clone)]
pub struct ReactionRemoveEvent {
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub emote: Emote,
}

/// Every reaction was stripped from a message
#[derive(Debug, Clone)]
pub struct ReactionRemoveAllEvent {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub guild_id: Option<Snowflake>,
}

/// Every reaction with one specific emote was stripped from a message
#[derive(Debug, Clone)]
pub struct ReactionRemoveEmoteEvent {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub emote: Emote,
}
