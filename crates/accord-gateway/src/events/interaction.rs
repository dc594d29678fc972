//! Interaction events
//!
//! INTERACTION_CREATE produces the generic event plus a specialization
//! by interaction kind (slash command or component).

use accord_core::{Interaction, OptionData};

/// Generic "an interaction arrived" event
#[derive(Debug, Clone)]
pub struct InteractionCreateEvent {
    pub interaction: Interaction,
}

/// A slash command was invoked
#[derive(Debug, Clone)]
pub struct SlashCommandEvent {
    pub interaction: Interaction,
    pub command_name: String,
    pub options: Vec<OptionData>,
}

/// A message component (button, etc.) was activated
#[derive(Debug, Clone)]
pub struct ComponentInteractionEvent {
    pub interaction: Interaction,
    pub custom_id: String,
}
