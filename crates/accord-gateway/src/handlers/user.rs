//! User and voice-state handlers

use super::{DispatchHandler, HandlerContext};
use crate::error::GatewayError;
use crate::events::{EventType, GatewayEvent, UserUpdateEvent, VoiceStateUpdateEvent};
use accord_core::{User, VoiceState};
use serde_json::Value;

/// Handles USER_UPDATE
pub struct UserUpdateHandler;

impl DispatchHandler for UserUpdateHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[EventType::UserUpdate]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        _event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        let user: User = serde_json::from_value(data)?;
        let old = ctx.cache().user(user.id);
        let user = ctx.builder.create_user(user);
        ctx.dispatcher
            .dispatch(GatewayEvent::UserUpdate(UserUpdateEvent { user, old }));
        Ok(())
    }
}

/// Handles VOICE_STATE_UPDATE
pub struct VoiceStateHandler;

impl DispatchHandler for VoiceStateHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[EventType::VoiceStateUpdate]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        _event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        let state: VoiceState = serde_json::from_value(data)?;
        let old = state
            .guild_id
            .and_then(|guild_id| ctx.cache().voice_state(guild_id, state.user_id));

        if state.channel_id.is_some() {
            let state = ctx.builder.create_voice_state(state);
            ctx.dispatcher
                .dispatch(GatewayEvent::VoiceStateUpdate(VoiceStateUpdateEvent {
                    state,
                    old,
                }));
        } else {
            // Disconnected from voice; drop the cached state.
            if let Some(guild_id) = state.guild_id {
                ctx.cache().remove_voice_state(guild_id, state.user_id);
            }
            ctx.dispatcher
                .dispatch(GatewayEvent::VoiceStateUpdate(VoiceStateUpdateEvent {
                    state,
                    old,
                }));
        }
        Ok(())
    }
}
