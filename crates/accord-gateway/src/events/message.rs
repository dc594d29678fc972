//! Message lifecycle events

use super::EntityAction;
use accord_core::{Component, Message, Snowflake};

/// Generic "a message changed" event
#[derive(Debug, Clone)]
pub struct GenericMessageEvent {
    pub action: EntityAction,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
}

/// A message was posted
#[derive(Debug, Clone)]
pub struct MessageCreateEvent {
    pub message: Message,
    /// Typed component tree rebuilt from the raw payloads; elements with
    /// unrecognized tags are omitted
    pub components: Vec<Component>,
}

/// A message was edited
#[derive(Debug, Clone)]
pub struct MessageUpdateEvent {
    pub message: Message,
    /// Cached state immediately before the edit, if it was cached
    pub old: Option<Message>,
    pub components: Vec<Component>,
}

/// A message was deleted
///
/// Bulk deletions are expanded into one event per message.
#[derive(Debug, Clone)]
pub struct MessageDeleteEvent {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    /// Cached state before deletion, if it was cached
    pub message: Option<Message>,
}
