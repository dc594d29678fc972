//! Application command lifecycle handlers

use super::{DispatchHandler, HandlerContext};
use crate::error::GatewayError;
use crate::events::{
    CommandCreateEvent, CommandDeleteEvent, CommandUpdateEvent, EventType, GatewayEvent,
};
use accord_core::ApplicationCommand;
use serde_json::Value;

/// Handles APPLICATION_COMMAND_CREATE / _UPDATE / _DELETE
pub struct CommandHandler;

impl DispatchHandler for CommandHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[
            EventType::ApplicationCommandCreate,
            EventType::ApplicationCommandUpdate,
            EventType::ApplicationCommandDelete,
        ]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        let command: ApplicationCommand = serde_json::from_value(data)?;

        match event_type {
            EventType::ApplicationCommandCreate => {
                let command = ctx.builder.create_command(command);
                ctx.dispatcher
                    .dispatch(GatewayEvent::CommandCreate(CommandCreateEvent { command }));
            }
            EventType::ApplicationCommandUpdate => {
                let old = ctx.cache().command(command.id);
                let command = ctx.builder.create_command(command);
                ctx.dispatcher
                    .dispatch(GatewayEvent::CommandUpdate(CommandUpdateEvent {
                        command,
                        old,
                    }));
            }
            _ => {
                let removed = ctx.cache().remove_command(command.id);
                ctx.dispatcher
                    .dispatch(GatewayEvent::CommandDelete(CommandDeleteEvent {
                        command_id: command.id,
                        command: removed,
                    }));
            }
        }
        Ok(())
    }
}
