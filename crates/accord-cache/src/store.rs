//! Concurrent in-memory entity storage.
//!
//! One [`EntityCache`] is shared across every connection and listener of a
//! client. All maps are `DashMap`s, so put/get/delete are safe under
//! concurrent access from multiple dispatch pipelines. Put always
//! overwrites in place, so lookups by id observe the latest state.

use accord_core::{
    ApplicationCommand, Channel, Emote, Guild, GuildMember, Message, Role, Snowflake, User,
    VoiceState,
};
use dashmap::DashMap;
use tracing::debug;

/// Keyed storage for all cached entity kinds.
///
/// Guild-scoped kinds (members, roles, voice states, emotes) are keyed by
/// the pair `(guild_id, entity_id)`; messages by `(channel_id, message_id)`.
#[derive(Debug, Default)]
pub struct EntityCache {
    users: DashMap<Snowflake, User>,
    guilds: DashMap<Snowflake, Guild>,
    channels: DashMap<Snowflake, Channel>,
    messages: DashMap<(Snowflake, Snowflake), Message>,
    members: DashMap<(Snowflake, Snowflake), GuildMember>,
    roles: DashMap<(Snowflake, Snowflake), Role>,
    voice_states: DashMap<(Snowflake, Snowflake), VoiceState>,
    emotes: DashMap<(Snowflake, Snowflake), Emote>,
    commands: DashMap<Snowflake, ApplicationCommand>,
}

impl EntityCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Users ---

    pub fn put_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    #[must_use]
    pub fn user(&self, id: Snowflake) -> Option<User> {
        self.users.get(&id).map(|u| u.clone())
    }

    pub fn remove_user(&self, id: Snowflake) -> Option<User> {
        self.users.remove(&id).map(|(_, u)| u)
    }

    // --- Guilds ---

    pub fn put_guild(&self, guild: Guild) {
        self.guilds.insert(guild.id, guild);
    }

    #[must_use]
    pub fn guild(&self, id: Snowflake) -> Option<Guild> {
        self.guilds.get(&id).map(|g| g.clone())
    }

    pub fn remove_guild(&self, id: Snowflake) -> Option<Guild> {
        self.guilds.remove(&id).map(|(_, g)| g)
    }

    // --- Channels ---

    pub fn put_channel(&self, channel: Channel) {
        self.channels.insert(channel.id, channel);
    }

    #[must_use]
    pub fn channel(&self, id: Snowflake) -> Option<Channel> {
        self.channels.get(&id).map(|c| c.clone())
    }

    pub fn remove_channel(&self, id: Snowflake) -> Option<Channel> {
        self.channels.remove(&id).map(|(_, c)| c)
    }

    // --- Messages, keyed by (channel, message) ---

    pub fn put_message(&self, message: Message) {
        self.messages
            .insert((message.channel_id, message.id), message);
    }

    #[must_use]
    pub fn message(&self, channel_id: Snowflake, message_id: Snowflake) -> Option<Message> {
        self.messages.get(&(channel_id, message_id)).map(|m| m.clone())
    }

    pub fn remove_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Option<Message> {
        self.messages.remove(&(channel_id, message_id)).map(|(_, m)| m)
    }

    // --- Members ---

    pub fn put_member(&self, guild_id: Snowflake, member: GuildMember) {
        if let Some(user_id) = member.user_id() {
            self.members.insert((guild_id, user_id), member);
        }
    }

    #[must_use]
    pub fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<GuildMember> {
        self.members.get(&(guild_id, user_id)).map(|m| m.clone())
    }

    pub fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<GuildMember> {
        self.members.remove(&(guild_id, user_id)).map(|(_, m)| m)
    }

    // --- Roles ---

    pub fn put_role(&self, guild_id: Snowflake, role: Role) {
        self.roles.insert((guild_id, role.id), role);
    }

    #[must_use]
    pub fn role(&self, guild_id: Snowflake, role_id: Snowflake) -> Option<Role> {
        self.roles.get(&(guild_id, role_id)).map(|r| r.clone())
    }

    pub fn remove_role(&self, guild_id: Snowflake, role_id: Snowflake) -> Option<Role> {
        self.roles.remove(&(guild_id, role_id)).map(|(_, r)| r)
    }

    /// Roles of one guild, in no particular order.
    #[must_use]
    pub fn guild_roles(&self, guild_id: Snowflake) -> Vec<Role> {
        self.roles
            .iter()
            .filter(|entry| entry.key().0 == guild_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    // --- Voice states ---

    pub fn put_voice_state(&self, state: VoiceState) {
        if let Some(guild_id) = state.guild_id {
            self.voice_states.insert((guild_id, state.user_id), state);
        }
    }

    #[must_use]
    pub fn voice_state(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<VoiceState> {
        self.voice_states.get(&(guild_id, user_id)).map(|v| v.clone())
    }

    pub fn remove_voice_state(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Option<VoiceState> {
        self.voice_states.remove(&(guild_id, user_id)).map(|(_, v)| v)
    }

    // --- Emotes ---

    pub fn put_emote(&self, guild_id: Snowflake, emote: Emote) {
        if let Some(emote_id) = emote.id {
            self.emotes.insert((guild_id, emote_id), emote);
        }
    }

    #[must_use]
    pub fn emote(&self, guild_id: Snowflake, emote_id: Snowflake) -> Option<Emote> {
        self.emotes.get(&(guild_id, emote_id)).map(|e| e.clone())
    }

    pub fn remove_emote(&self, guild_id: Snowflake, emote_id: Snowflake) -> Option<Emote> {
        self.emotes.remove(&(guild_id, emote_id)).map(|(_, e)| e)
    }

    /// Custom emotes of one guild, in no particular order.
    #[must_use]
    pub fn guild_emotes(&self, guild_id: Snowflake) -> Vec<Emote> {
        self.emotes
            .iter()
            .filter(|entry| entry.key().0 == guild_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    // --- Application commands ---

    pub fn put_command(&self, command: ApplicationCommand) {
        self.commands.insert(command.id, command);
    }

    #[must_use]
    pub fn command(&self, id: Snowflake) -> Option<ApplicationCommand> {
        self.commands.get(&id).map(|c| c.clone())
    }

    pub fn remove_command(&self, id: Snowflake) -> Option<ApplicationCommand> {
        self.commands.remove(&id).map(|(_, c)| c)
    }

    // --- Bulk eviction ---

    /// Drop every guild-scoped entity belonging to `guild_id`, and the
    /// guild record itself. Used when a guild is deleted or becomes
    /// unavailable.
    pub fn evict_guild(&self, guild_id: Snowflake) {
        self.guilds.remove(&guild_id);
        self.members.retain(|key, _| key.0 != guild_id);
        self.roles.retain(|key, _| key.0 != guild_id);
        self.voice_states.retain(|key, _| key.0 != guild_id);
        self.emotes.retain(|key, _| key.0 != guild_id);
        self.channels
            .retain(|_, channel| channel.guild_id != Some(guild_id));
        debug!(guild_id = %guild_id, "evicted guild from cache");
    }

    /// Drop every cached message belonging to one channel.
    pub fn evict_channel_messages(&self, channel_id: Snowflake) {
        self.messages.retain(|key, _| key.0 != channel_id);
    }

    /// Number of cached users (primarily for diagnostics and tests).
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of cached guilds.
    #[must_use]
    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    /// Number of cached messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
