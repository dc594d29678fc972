//! Domain events delivered to listeners
//!
//! Events are immutable snapshots: update events carry a copy of the
//! prior cached state captured before the cache was overwritten.

mod channel;
mod command;
mod event_types;
mod guild;
mod interaction;
mod message;
mod reaction;
mod ready;
mod user;

pub use channel::{
    ChannelCreateEvent, ChannelDeleteEvent, ChannelUpdateEvent, GenericChannelEvent,
};
pub use command::{CommandCreateEvent, CommandDeleteEvent, CommandUpdateEvent};
pub use event_types::EventType;
pub use guild::{
    EmoteCreateEvent, EmoteDeleteEvent, EmoteUpdateEvent, GenericGuildEvent, GenericMemberEvent,
    GenericRoleEvent, GuildCreateEvent, GuildDeleteEvent, GuildUpdateEvent, MemberAddEvent,
    MemberRemoveEvent, MemberUpdateEvent, RoleCreateEvent, RoleDeleteEvent, RoleUpdateEvent,
};
pub use interaction::{ComponentInteractionEvent, InteractionCreateEvent, SlashCommandEvent};
pub use message::{
    GenericMessageEvent, MessageCreateEvent, MessageDeleteEvent, MessageUpdateEvent,
};
pub use reaction::{
    GenericReactionEvent, ReactionAddEvent, ReactionRemoveAllEvent, ReactionRemoveEmoteEvent,
    ReactionRemoveEvent,
};
pub use ready::{ReadyEvent, StatusChangeEvent};
pub use user::{UserUpdateEvent, VoiceStateUpdateEvent};

/// What happened to an entity, carried by the generic event layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    Created,
    Updated,
    Deleted,
}

/// Every event the dispatcher can deliver
///
/// Lifecycle changes fan out in two layers: the generic variant first,
/// then the action-specific one.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// Connection lifecycle notification
    StatusChange(StatusChangeEvent),
    Ready(ReadyEvent),
    Resumed,

    Channel(GenericChannelEvent),
    ChannelCreate(ChannelCreateEvent),
    ChannelUpdate(ChannelUpdateEvent),
    ChannelDelete(ChannelDeleteEvent),

    Guild(GenericGuildEvent),
    GuildCreate(GuildCreateEvent),
    GuildUpdate(GuildUpdateEvent),
    GuildDelete(GuildDeleteEvent),

    Member(GenericMemberEvent),
    MemberAdd(MemberAddEvent),
    MemberUpdate(MemberUpdateEvent),
    MemberRemove(MemberRemoveEvent),

    Role(GenericRoleEvent),
    RoleCreate(RoleCreateEvent),
    RoleUpdate(RoleUpdateEvent),
    RoleDelete(RoleDeleteEvent),

    EmoteCreate(EmoteCreateEvent),
    EmoteUpdate(EmoteUpdateEvent),
    EmoteDelete(EmoteDeleteEvent),

    Message(GenericMessageEvent),
    MessageCreate(MessageCreateEvent),
    MessageUpdate(MessageUpdateEvent),
    MessageDelete(MessageDeleteEvent),

    Reaction(GenericReactionEvent),
    ReactionAdd(ReactionAddEvent),
    ReactionRemove(ReactionRemoveEvent),
    ReactionRemoveAll(ReactionRemoveAllEvent),
    ReactionRemoveEmote(ReactionRemoveEmoteEvent),

    Interaction(InteractionCreateEvent),
    SlashCommand(SlashCommandEvent),
    ComponentInteraction(ComponentInteractionEvent),

    VoiceStateUpdate(VoiceStateUpdateEvent),
    UserUpdate(UserUpdateEvent),

    CommandCreate(CommandCreateEvent),
    CommandUpdate(CommandUpdateEvent),
    CommandDelete(CommandDeleteEvent),
}

impl GatewayEvent {
    /// Short name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StatusChange(_) => "StatusChange",
            Self::Ready(_) => "Ready",
            Self::Resumed => "Resumed",
            Self::Channel(_) => "Channel",
            Self::ChannelCreate(_) => "ChannelCreate",
            Self::ChannelUpdate(_) => "ChannelUpdate",
            Self::ChannelDelete(_) => "ChannelDelete",
            Self::Guild(_) => "Guild",
            Self::GuildCreate(_) => "GuildCreate",
            Self::GuildUpdate(_) => "GuildUpdate",
            Self::GuildDelete(_) => "GuildDelete",
            Self::Member(_) => "Member",
            Self::MemberAdd(_) => "MemberAdd",
            Self::MemberUpdate(_) => "MemberUpdate",
            Self::MemberRemove(_) => "MemberRemove",
            Self::Role(_) => "Role",
            Self::RoleCreate(_) => "RoleCreate",
            Self::RoleUpdate(_) => "RoleUpdate",
            Self::RoleDelete(_) => "RoleDelete",
            Self::EmoteCreate(_) => "EmoteCreate",
            Self::EmoteUpdate(_) => "EmoteUpdate",
            Self::EmoteDelete(_) => "EmoteDelete",
            Self::Message(_) => "Message",
            Self::MessageCreate(_) => "MessageCreate",
            Self::MessageUpdate(_) => "MessageUpdate",
            Self::MessageDelete(_) => "MessageDelete",
            Self::Reaction(_) => "Reaction",
            Self::ReactionAdd(_) => "ReactionAdd",
            Self::ReactionRemove(_) => "ReactionRemove",
            Self::ReactionRemoveAll(_) => "ReactionRemoveAll",
            Self::ReactionRemoveEmote(_) => "ReactionRemoveEmote",
            Self::Interaction(_) => "Interaction",
            Self::SlashCommand(_) => "SlashCommand",
            Self::ComponentInteraction(_) => "ComponentInteraction",
            Self::VoiceStateUpdate(_) => "VoiceStateUpdate",
            Self::UserUpdate(_) => "UserUpdate",
            Self::CommandCreate(_) => "CommandCreate",
            Self::CommandUpdate(_) => "CommandUpdate",
            Self::CommandDelete(_) => "CommandDelete",
        }
    }
}
