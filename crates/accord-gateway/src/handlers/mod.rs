//! Dispatch event handlers
//!
//! One handler per wire event type. A handler decodes the raw payload,
//! runs the entity builder, and hands domain events to the dispatcher.
//! Handler failures drop the single frame; they never reach the read
//! loop.

mod channel;
mod command;
mod guild;
mod interaction;
mod message;
mod reaction;
mod ready;
mod user;

use crate::builder::EntityBuilder;
use crate::dispatch::EventDispatcher;
use crate::error::GatewayError;
use crate::events::EventType;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub use channel::ChannelHandler;
pub use command::CommandHandler;
pub use guild::{EmotesUpdateHandler, GuildHandler, MemberHandler, RoleHandler};
pub use interaction::InteractionHandler;
pub use message::MessageHandler;
pub use reaction::ReactionHandler;
pub use ready::ReadyHandler;
pub use user::{UserUpdateHandler, VoiceStateHandler};

/// Shared collaborators available to every handler
pub struct HandlerContext {
    pub builder: Arc<EntityBuilder>,
    pub dispatcher: Arc<EventDispatcher>,
}

impl HandlerContext {
    /// Create a context over the given builder and dispatcher
    #[must_use]
    pub fn new(builder: Arc<EntityBuilder>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            builder,
            dispatcher,
        }
    }

    /// Shortcut to the entity cache behind the builder
    #[must_use]
    pub fn cache(&self) -> &Arc<accord_cache::EntityCache> {
        self.builder.cache()
    }
}

/// Decoder/handler for one or more dispatch event types
pub trait DispatchHandler: Send + Sync {
    /// Event types this handler consumes
    fn event_types(&self) -> &'static [EventType];

    /// Decode and process one dispatch frame
    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError>;
}

/// Maps wire event-type identifiers to their handlers
pub struct HandlerRegistry {
    handlers: HashMap<EventType, Arc<dyn DispatchHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with every built-in handler registered
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ReadyHandler));
        registry.register(Arc::new(ChannelHandler));
        registry.register(Arc::new(GuildHandler));
        registry.register(Arc::new(MemberHandler));
        registry.register(Arc::new(RoleHandler));
        registry.register(Arc::new(EmotesUpdateHandler));
        registry.register(Arc::new(MessageHandler));
        registry.register(Arc::new(ReactionHandler));
        registry.register(Arc::new(InteractionHandler));
        registry.register(Arc::new(VoiceStateHandler));
        registry.register(Arc::new(UserUpdateHandler));
        registry.register(Arc::new(CommandHandler));
        registry
    }

    /// Register a handler for each event type it declares
    pub fn register(&mut self, handler: Arc<dyn DispatchHandler>) {
        for event_type in handler.event_types() {
            self.handlers.insert(*event_type, Arc::clone(&handler));
        }
    }

    /// Route one dispatch frame to its handler
    ///
    /// Unknown event types are logged and ignored; a handler error drops
    /// the frame. Neither is fatal to the connection.
    pub fn dispatch(&self, ctx: &HandlerContext, raw_type: &str, data: Value) {
        let Some(event_type) = EventType::from_str(raw_type) else {
            debug!(event_type = raw_type, "ignoring unknown event type");
            return;
        };
        let Some(handler) = self.handlers.get(&event_type) else {
            debug!(event_type = raw_type, "no handler registered");
            return;
        };
        if let Err(err) = handler.handle(ctx, event_type, data) {
            warn!(event_type = raw_type, error = %err, "dropping malformed frame");
        }
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
