//! Channel lifecycle handlers

use super::{DispatchHandler, HandlerContext};
use crate::error::GatewayError;
use crate::events::{
    ChannelCreateEvent, ChannelDeleteEvent, ChannelUpdateEvent, EntityAction, EventType,
    GatewayEvent, GenericChannelEvent,
};
use accord_core::Channel;
use serde_json::Value;

/// Handles CHANNEL_CREATE / CHANNEL_UPDATE / CHANNEL_DELETE
pub struct ChannelHandler;

impl DispatchHandler for ChannelHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[
            EventType::ChannelCreate,
            EventType::ChannelUpdate,
            EventType::ChannelDelete,
        ]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        let channel: Channel = serde_json::from_value(data)?;

        match event_type {
            EventType::ChannelCreate => {
                let channel = ctx.builder.create_channel(channel);
                ctx.dispatcher
                    .dispatch(GatewayEvent::Channel(GenericChannelEvent {
                        action: EntityAction::Created,
                        channel: channel.clone(),
                        old: None,
                    }));
                ctx.dispatcher
                    .dispatch(GatewayEvent::ChannelCreate(ChannelCreateEvent { channel }));
            }
            EventType::ChannelUpdate => {
                // Snapshot the prior state before the cache is overwritten.
                let old = ctx.cache().channel(channel.id);
                let channel = ctx.builder.create_channel(channel);
                ctx.dispatcher
                    .dispatch(GatewayEvent::Channel(GenericChannelEvent {
                        action: EntityAction::Updated,
                        channel: channel.clone(),
                        old: old.clone(),
                    }));
                ctx.dispatcher
                    .dispatch(GatewayEvent::ChannelUpdate(ChannelUpdateEvent {
                        channel,
                        old,
                    }));
            }
            _ => {
                ctx.cache().remove_channel(channel.id);
                ctx.cache().evict_channel_messages(channel.id);
                ctx.dispatcher
                    .dispatch(GatewayEvent::Channel(GenericChannelEvent {
                        action: EntityAction::Deleted,
                        channel: channel.clone(),
                        old: None,
                    }));
                ctx.dispatcher
                    .dispatch(GatewayEvent::ChannelDelete(ChannelDeleteEvent { channel }));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::EntityBuilder;
    use crate::connection::{ConnectionStatus, SessionState};
    use crate::dispatch::EventDispatcher;
    use accord_cache::{CacheConfig, EntityCache};
    use accord_core::Snowflake;
    use std::sync::Arc;

    fn ctx() -> HandlerContext {
        let session = Arc::new(SessionState::new());
        session.set_status(ConnectionStatus::Ready);
        HandlerContext::new(
            Arc::new(EntityBuilder::new(
                Arc::new(EntityCache::new()),
                CacheConfig::default(),
                session,
            )),
            Arc::new(EventDispatcher::new()),
        )
    }

    #[tokio::test]
    async fn test_create_then_delete_round_trip() {
        let ctx = ctx();
        let data = serde_json::json!({"id": "5", "type": 0, "guild_id": "1", "name": "general"});

        ChannelHandler
            .handle(&ctx, EventType::ChannelCreate, data.clone())
            .unwrap();
        assert!(ctx.cache().channel(Snowflake::new(5)).is_some());

        ChannelHandler
            .handle(&ctx, EventType::ChannelDelete, data)
            .unwrap();
        assert!(ctx.cache().channel(Snowflake::new(5)).is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_cache() {
        let ctx = ctx();
        ChannelHandler
            .handle(
                &ctx,
                EventType::ChannelCreate,
                serde_json::json!({"id": "5", "type": 0, "name": "before"}),
            )
            .unwrap();
        ChannelHandler
            .handle(
                &ctx,
                EventType::ChannelUpdate,
                serde_json::json!({"id": "5", "type": 0, "name": "after"}),
            )
            .unwrap();
        let cached = ctx.cache().channel(Snowflake::new(5)).unwrap();
        assert_eq!(cached.name.as_deref(), Some("after"));
    }
}
