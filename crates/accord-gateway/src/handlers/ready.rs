//! READY and RESUMED handlers

use super::{DispatchHandler, HandlerContext};
use crate::error::GatewayError;
use crate::events::{EventType, GatewayEvent, ReadyEvent};
use crate::protocol::ReadyPayload;
use serde_json::Value;
use tracing::info;

/// Handles handshake acknowledgments
pub struct ReadyHandler;

impl DispatchHandler for ReadyHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[EventType::Ready, EventType::Resumed]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        if event_type == EventType::Resumed {
            ctx.dispatcher.dispatch(GatewayEvent::Resumed);
            return Ok(());
        }

        let payload: ReadyPayload = serde_json::from_value(data)?;
        info!(
            session_id = %payload.session_id,
            guilds = payload.guilds.len(),
            "gateway ready"
        );

        let user = ctx.builder.create_user(payload.user);
        // Guild entries arrive as unavailable stubs; GUILD_CREATE fills
        // them in afterwards.
        let guilds = payload
            .guilds
            .into_iter()
            .map(|guild| ctx.builder.create_guild(guild))
            .collect();

        ctx.dispatcher.dispatch(GatewayEvent::Ready(ReadyEvent {
            session_id: payload.session_id,
            user,
            guilds,
        }));
        Ok(())
    }
}
