//! Wire payload fixtures and a socketless pipeline harness

use std::sync::Arc;

use accord_cache::{CacheConfig, EntityCache};
use accord_gateway::connection::{ConnectionStatus, SessionState};
use accord_gateway::dispatch::EventDispatcher;
use accord_gateway::handlers::{HandlerContext, HandlerRegistry};
use accord_gateway::EntityBuilder;
use serde_json::{json, Value};

pub fn user_json(id: &str, username: &str) -> Value {
    json!({ "id": id, "username": username })
}

pub fn guild_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn channel_json(id: &str, guild_id: &str, name: &str) -> Value {
    json!({ "id": id, "guild_id": guild_id, "name": name, "type": 0 })
}

pub fn member_json(guild_id: &str, user_id: &str, username: &str) -> Value {
    json!({
        "guild_id": guild_id,
        "user": user_json(user_id, username),
        "roles": []
    })
}

// The default message policy only admits recent messages; the fixture
// carries a fresh timestamp so low test ids do not age it out.
pub fn message_json(id: &str, channel_id: &str, author_id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "channel_id": channel_id,
        "author": user_json(author_id, "author"),
        "content": content,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}

pub fn ready_json(session_id: &str) -> Value {
    json!({
        "v": 1,
        "user": user_json("100", "self"),
        "session_id": session_id,
        "guilds": [ { "id": "200", "unavailable": true } ]
    })
}

/// Registry + context wired to a fresh cache, no socket involved
///
/// Feeds raw dispatch payloads straight into the handler registry the
/// way the read loop would.
pub struct Pipeline {
    pub cache: Arc<EntityCache>,
    pub session: Arc<SessionState>,
    pub dispatcher: Arc<EventDispatcher>,
    pub registry: HandlerRegistry,
    pub ctx: HandlerContext,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_cache_config(CacheConfig::default())
    }

    pub fn with_cache_config(config: CacheConfig) -> Self {
        let cache = Arc::new(EntityCache::new());
        let session = Arc::new(SessionState::new());
        session.set_status(ConnectionStatus::Ready);
        let dispatcher = Arc::new(EventDispatcher::new());
        let builder = Arc::new(EntityBuilder::new(
            Arc::clone(&cache),
            config,
            Arc::clone(&session),
        ));
        let ctx = HandlerContext::new(builder, Arc::clone(&dispatcher));
        Self {
            cache,
            session,
            dispatcher,
            registry: HandlerRegistry::with_defaults(),
            ctx,
        }
    }

    /// Feed one dispatch frame into the registry
    pub fn feed(&self, event_type: &str, data: Value) {
        self.registry.dispatch(&self.ctx, event_type, data);
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
