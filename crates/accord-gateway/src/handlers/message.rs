//! Message lifecycle handlers

use super::{DispatchHandler, HandlerContext};
use crate::error::GatewayError;
use crate::events::{
    EntityAction, EventType, GatewayEvent, GenericMessageEvent, MessageCreateEvent,
    MessageDeleteEvent, MessageUpdateEvent,
};
use accord_core::{Message, Snowflake};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct MessageDeletePayload {
    id: Snowflake,
    channel_id: Snowflake,
}

#[derive(Debug, Deserialize)]
struct MessageDeleteBulkPayload {
    ids: Vec<Snowflake>,
    channel_id: Snowflake,
}

/// Handles MESSAGE_CREATE / MESSAGE_UPDATE / MESSAGE_DELETE /
/// MESSAGE_DELETE_BULK
pub struct MessageHandler;

impl MessageHandler {
    fn delete_one(ctx: &HandlerContext, channel_id: Snowflake, message_id: Snowflake) {
        let message = ctx.cache().remove_message(channel_id, message_id);
        ctx.dispatcher
            .dispatch(GatewayEvent::Message(GenericMessageEvent {
                action: EntityAction::Deleted,
                channel_id,
                message_id,
            }));
        ctx.dispatcher
            .dispatch(GatewayEvent::MessageDelete(MessageDeleteEvent {
                channel_id,
                message_id,
                message,
            }));
    }
}

impl DispatchHandler for MessageHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[
            EventType::MessageCreate,
            EventType::MessageUpdate,
            EventType::MessageDelete,
            EventType::MessageDeleteBulk,
        ]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        match event_type {
            EventType::MessageCreate => {
                let message: Message = serde_json::from_value(data)?;
                let message = ctx.builder.create_message(message);
                let components = ctx.builder.create_components(&message.components);
                ctx.dispatcher
                    .dispatch(GatewayEvent::Message(GenericMessageEvent {
                        action: EntityAction::Created,
                        channel_id: message.channel_id,
                        message_id: message.id,
                    }));
                ctx.dispatcher
                    .dispatch(GatewayEvent::MessageCreate(MessageCreateEvent {
                        message,
                        components,
                    }));
            }
            EventType::MessageUpdate => {
                let message: Message = serde_json::from_value(data)?;
                let old = ctx.cache().message(message.channel_id, message.id);
                let message = ctx.builder.create_message(message);
                let components = ctx.builder.create_components(&message.components);
                ctx.dispatcher
                    .dispatch(GatewayEvent::Message(GenericMessageEvent {
                        action: EntityAction::Updated,
                        channel_id: message.channel_id,
                        message_id: message.id,
                    }));
                ctx.dispatcher
                    .dispatch(GatewayEvent::MessageUpdate(MessageUpdateEvent {
                        message,
                        old,
                        components,
                    }));
            }
            EventType::MessageDelete => {
                let payload: MessageDeletePayload = serde_json::from_value(data)?;
                Self::delete_one(ctx, payload.channel_id, payload.id);
            }
            _ => {
                // Bulk deletions expand into one event per message.
                let payload: MessageDeleteBulkPayload = serde_json::from_value(data)?;
                for message_id in payload.ids {
                    Self::delete_one(ctx, payload.channel_id, message_id);
                }
            }
        }
        Ok(())
    }
}
