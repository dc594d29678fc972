//! Application command lifecycle events

use accord_core::{ApplicationCommand, Snowflake};

/// A command was registered
#[derive(Debug, Clone)]
pub struct CommandCreateEvent {
    pub command: ApplicationCommand,
}

/// A command definition changed
#[derive(Debug, Clone)]
pub struct CommandUpdateEvent {
    pub command: ApplicationCommand,
    pub old: Option<ApplicationCommand>,
}

/// A command was unregistered
#[derive(Debug, Clone)]
pub struct CommandDeleteEvent {
    pub command_id: Snowflake,
    pub command: Option<ApplicationCommand>,
}
