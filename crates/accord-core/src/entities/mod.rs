//! Domain entities - the objects the gateway materializes and caches

mod channel;
mod command;
mod component;
mod emote;
mod guild;
mod interaction;
mod member;
mod message;
mod reaction;
mod role;
mod user;
mod voice_state;

pub use channel::{Channel, ChannelKind};
pub use command::{ApplicationCommand, CommandOption, CommandOptionKind};
pub use component::{ActionRow, Button, Component, ComponentKind, ComponentPayload};
pub use emote::Emote;
pub use guild::Guild;
pub use interaction::{Interaction, InteractionData, InteractionKind, OptionData, ResolvedData};
pub use member::GuildMember;
pub use message::Message;
pub use reaction::Reaction;
pub use role::Role;
pub use user::User;
pub use voice_state::VoiceState;
