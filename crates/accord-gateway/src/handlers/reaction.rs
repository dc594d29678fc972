//! Message reaction handlers

use super::{DispatchHandler, HandlerContext};
use crate::error::GatewayError;
use crate::events::{
    EntityAction, EventType, GatewayEvent, GenericReactionEvent, ReactionAddEvent,
    ReactionRemoveAllEvent, ReactionRemoveEmoteEvent, ReactionRemoveEvent,
};
use accord_core::{Emote, Message, Reaction, Snowflake};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ReactionPayload {
    user_id: Snowflake,
    channel_id: Snowflake,
    message_id: Snowflake,
    #[serde(default)]
    guild_id: Option<Snowflake>,
    #[serde(rename = "emoji")]
    emote: Emote,
}

#[derive(Debug, Deserialize)]
struct ReactionScopePayload {
    channel_id: Snowflake,
    message_id: Snowflake,
    #[serde(default)]
    guild_id: Option<Snowflake>,
    #[serde(default, rename = "emoji")]
    emote: Option<Emote>,
}

/// Handles MESSAGE_REACTION_ADD / MESSAGE_REACTION_REMOVE /
/// MESSAGE_REACTION_REMOVE_ALL / MESSAGE_REACTION_REMOVE_EMOJI
///
/// Per-user notifications fold into the aggregated counts on the cached
/// message; a message that is not cached passes through untouched.
pub struct ReactionHandler;

impl ReactionHandler {
    fn with_cached_message(
        ctx: &HandlerContext,
        channel_id: Snowflake,
        message_id: Snowflake,
        mutate: impl FnOnce(&mut Message),
    ) {
        if let Some(mut message) = ctx.cache().message(channel_id, message_id) {
            mutate(&mut message);
            ctx.cache().put_message(message);
        }
    }

    fn dispatch_generic(
        ctx: &HandlerContext,
        action: EntityAction,
        channel_id: Snowflake,
        message_id: Snowflake,
        guild_id: Option<Snowflake>,
    ) {
        ctx.dispatcher
            .dispatch(GatewayEvent::Reaction(GenericReactionEvent {
                action,
                channel_id,
                message_id,
                guild_id,
            }));
    }
}

impl DispatchHandler for ReactionHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[
            EventType::MessageReactionAdd,
            EventType::MessageReactionRemove,
            EventType::MessageReactionRemoveAll,
            EventType::MessageReactionRemoveEmote,
        ]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        match event_type {
            EventType::MessageReactionAdd => {
                let payload: ReactionPayload = serde_json::from_value(data)?;
                Self::with_cached_message(ctx, payload.channel_id, payload.message_id, |msg| {
                    match msg.reactions.iter_mut().find(|r| r.matches(&payload.emote)) {
                        Some(entry) => entry.count += 1,
                        None => msg.reactions.push(Reaction::new(payload.emote.clone())),
                    }
                });
                Self::dispatch_generic(
                    ctx,
                    EntityAction::Created,
                    payload.channel_id,
                    payload.message_id,
                    payload.guild_id,
                );
                ctx.dispatcher
                    .dispatch(GatewayEvent::ReactionAdd(ReactionAddEvent {
                        user_id: payload.user_id,
                        channel_id: payload.channel_id,
                        message_id: payload.message_id,
                        guild_id: payload.guild_id,
                        emote: payload.emote,
                    }));
            }
            EventType::MessageReactionRemove => {
                let payload: ReactionPayload = serde_json::from_value(data)?;
                Self::with_cached_message(ctx, payload.channel_id, payload.message_id, |msg| {
                    if let Some(pos) =
                        msg.reactions.iter().position(|r| r.matches(&payload.emote))
                    {
                        msg.reactions[pos].count -= 1;
                        if msg.reactions[pos].count <= 0 {
                            msg.reactions.remove(pos);
                        }
                    }
                });
                Self::dispatch_generic(
                    ctx,
                    EntityAction::Deleted,
                    payload.channel_id,
                    payload.message_id,
                    payload.guild_id,
                );
                ctx.dispatcher
                    .dispatch(GatewayEvent::ReactionRemove(ReactionRemoveEvent {
                        user_id: payload.user_id,
                        channel_id: payload.channel_id,
                        message_id: payload.message_id,
                        guild_id: payload.guild_id,
                        emote: payload.emote,
                    }));
            }
            EventType::MessageReactionRemoveAll => {
                let payload: ReactionScopePayload = serde_json::from_value(data)?;
                Self::with_cached_message(ctx, payload.channel_id, payload.message_id, |msg| {
                    msg.reactions.clear();
                });
                Self::dispatch_generic(
                    ctx,
                    EntityAction::Deleted,
                    payload.channel_id,
                    payload.message_id,
                    payload.guild_id,
                );
                ctx.dispatcher
                    .dispatch(GatewayEvent::ReactionRemoveAll(ReactionRemoveAllEvent {
                        channel_id: payload.channel_id,
                        message_id: payload.message_id,
                        guild_id: payload.guild_id,
                    }));
            }
            _ => {
                let payload: ReactionScopePayload = serde_json::from_value(data)?;
                let Some(emote) = payload.emote else {
                    return Err(GatewayError::Decode(serde::de::Error::custom(
                        "MESSAGE_REACTION_REMOVE_EMOJI without emoji",
                    )));
                };
                Self::with_cached_message(ctx, payload.channel_id, payload.message_id, |msg| {
                    msg.reactions.retain(|r| !r.matches(&emote));
                });
                Self::dispatch_generic(
                    ctx,
                    EntityAction::Deleted,
                    payload.channel_id,
                    payload.message_id,
                    payload.guild_id,
                );
                ctx.dispatcher.dispatch(GatewayEvent::ReactionRemoveEmote(
                    ReactionRemoveEmoteEvent {
                        channel_id: payload.channel_id,
                        message_id: payload.message_id,
                        guild_id: payload.guild_id,
                        emote,
                    },
                ));
            }
        }
        Ok(())
    }
}
