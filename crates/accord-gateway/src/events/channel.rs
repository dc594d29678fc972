//! Channel lifecycle events
//!
//! Each lifecycle change produces a generic event first, then the
//! action-specific event; listeners subscribe at either granularity.

use super::EntityAction;
use accord_core::Channel;

/// Generic "a channel changed" event, dispatched before the specific one
#[derive(Debug, Clone)]
pub struct GenericChannelEvent {
    pub action: EntityAction,
    pub channel: Channel,
    /// Prior cached state, present only for updates
    pub old: Option<Channel>,
}

/// A channel was created
#[derive(Debug, Clone)]
pub struct ChannelCreateEvent {
    pub channel: Channel,
}

/// A channel was updated
#[derive(Debug, Clone)]
pub struct ChannelUpdateEvent {
    pub channel: Channel,
    /// Cached state immediately before this update, if it was cached
    pub old: Option<Channel>,
}

/// A channel was deleted
#[derive(Debug, Clone)]
pub struct ChannelDeleteEvent {
    pub channel: Channel,
}
