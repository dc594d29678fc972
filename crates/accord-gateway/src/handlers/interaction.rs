//! Interaction handler
//!
//! INTERACTION_CREATE fans out as the generic event followed by a
//! specialization: slash command or component interaction.

use super::{DispatchHandler, HandlerContext};
use crate::error::GatewayError;
use crate::events::{
    ComponentInteractionEvent, EventType, GatewayEvent, InteractionCreateEvent, SlashCommandEvent,
};
use accord_core::{Interaction, InteractionKind};
use serde_json::Value;

/// Handles INTERACTION_CREATE
pub struct InteractionHandler;

impl DispatchHandler for InteractionHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[EventType::InteractionCreate]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        _event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        let interaction: Interaction = serde_json::from_value(data)?;
        let interaction = ctx.builder.create_interaction(interaction);

        ctx.dispatcher
            .dispatch(GatewayEvent::Interaction(InteractionCreateEvent {
                interaction: interaction.clone(),
            }));

        match interaction.kind {
            InteractionKind::ApplicationCommand => {
                let (command_name, options) = interaction
                    .data
                    .as_ref()
                    .map(|data| {
                        (
                            data.name.clone().unwrap_or_default(),
                            data.options.clone(),
                        )
                    })
                    .unwrap_or_default();
                ctx.dispatcher
                    .dispatch(GatewayEvent::SlashCommand(SlashCommandEvent {
                        interaction,
                        command_name,
                        options,
                    }));
            }
            InteractionKind::Component => {
                let custom_id = interaction
                    .data
                    .as_ref()
                    .and_then(|data| data.custom_id.clone())
                    .unwrap_or_default();
                ctx.dispatcher
                    .dispatch(GatewayEvent::ComponentInteraction(
                        ComponentInteractionEvent {
                            interaction,
                            custom_id,
                        },
                    ));
            }
            InteractionKind::Ping => {}
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
    async fn test_slash_command_caches_invoker() {
        let ctx = ctx();
        let data = serde_json::json!({
            "id": "1", "type": 2, "guild_id": "10", "token": "t",
            "member": {"user": {"id": "3", "username": "bob"}},
            "data": {"id": "20", "name": "ping"},
        });
        InteractionHandler
            .handle(&ctx, EventType::InteractionCreate, data)
            .unwrap();
        assert!(ctx.cache().user(Snowflake::new(3)).is_some());
        assert!(ctx
            .cache()
            .member(Snowflake::new(10), Snowflake::new(3))
            .is_some());
    }
}
