//! Entity materialization
//!
//! Turns raw wire payloads into fully linked domain entities, writing
//! them into the cache when the configured policy admits them. The
//! policy consults a snapshot of the connection status, so builds are
//! deterministic under test.

use crate::connection::SessionState;
use accord_cache::{CacheConfig, CachePolicy, EntityCache, PolicyContext};
use accord_core::{
    ActionRow, ApplicationCommand, Button, Channel, Component, ComponentKind, ComponentPayload,
    Emote, Guild, GuildMember, Interaction, Message, Role, Snowflake, User, VoiceState,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Materializes wire payloads into cached domain entities
pub struct EntityBuilder {
    cache: Arc<EntityCache>,
    config: CacheConfig,
    session: Arc<SessionState>,
}

impl EntityBuilder {
    /// Create a builder over the given cache and policy configuration
    #[must_use]
    pub fn new(cache: Arc<EntityCache>, config: CacheConfig, session: Arc<SessionState>) -> Self {
        Self {
            cache,
            config,
            session,
        }
    }

    /// The cache this builder writes into
    #[must_use]
    pub fn cache(&self) -> &Arc<EntityCache> {
        &self.cache
    }

    fn context(&self) -> PolicyContext {
        PolicyContext::new(self.session.status().is_ready())
    }

    fn admits(&self, policy: &CachePolicy, created_at: DateTime<Utc>) -> bool {
        policy.admits(&self.context(), created_at)
    }

    /// Materialize a user
    pub fn create_user(&self, user: User) -> User {
        if self.admits(&self.config.users, user.id.created_at()) {
            self.cache.put_user(user.clone());
        }
        user
    }

    /// Materialize a guild
    pub fn create_guild(&self, guild: Guild) -> Guild {
        if self.admits(&self.config.guilds, guild.id.created_at()) {
            self.cache.put_guild(guild.clone());
        }
        guild
    }

    /// Materialize a channel
    pub fn create_channel(&self, channel: Channel) -> Channel {
        if self.admits(&self.config.channels, channel.id.created_at()) {
            self.cache.put_channel(channel.clone());
        }
        channel
    }

    /// Materialize a guild member
    ///
    /// The embedded user is materialized first, so the member's user
    /// reference is the same state a direct user lookup returns.
    pub fn create_member(&self, guild_id: Snowflake, mut member: GuildMember) -> GuildMember {
        member.guild_id = Some(guild_id);
        if let Some(user) = member.user.take() {
            member.user = Some(self.create_user(user));
        }
        let created_at = member
            .user_id()
            .map_or_else(Utc::now, |id| id.created_at());
        if self.admits(&self.config.members, created_at) {
            self.cache.put_member(guild_id, member.clone());
        }
        member
    }

    /// Materialize a role
    pub fn create_role(&self, guild_id: Snowflake, mut role: Role) -> Role {
        role.guild_id = Some(guild_id);
        if self.admits(&self.config.roles, role.id.created_at()) {
            self.cache.put_role(guild_id, role.clone());
        }
        role
    }

    /// Materialize a message, linking its author and membership
    pub fn create_message(&self, mut message: Message) -> Message {
        if let Some(author) = message.author.take() {
            let author = self.create_user(author);
            if let (Some(guild_id), Some(mut member)) = (message.guild_id, message.member.take()) {
                // The member payload inside a message omits its user.
                member.user = Some(author.clone());
                message.member = Some(self.create_member(guild_id, member));
            }
            message.author = Some(author);
        }
        if self.admits(&self.config.messages, message.created_at()) {
            self.cache.put_message(message.clone());
        }
        message
    }

    /// Materialize a voice state
    pub fn create_voice_state(&self, state: VoiceState) -> VoiceState {
        if self.admits(&self.config.voice_states, state.user_id.created_at()) {
            self.cache.put_voice_state(state.clone());
        }
        state
    }

    /// Materialize a custom emote
    pub fn create_emote(&self, guild_id: Snowflake, mut emote: Emote) -> Emote {
        emote.guild_id = Some(guild_id);
        let created_at = emote.id.map_or_else(Utc::now, |id| id.created_at());
        if self.admits(&self.config.emotes, created_at) {
            self.cache.put_emote(guild_id, emote.clone());
        }
        emote
    }

    /// Materialize an application command
    pub fn create_command(&self, command: ApplicationCommand) -> ApplicationCommand {
        if self.admits(&self.config.commands, command.id.created_at()) {
            self.cache.put_command(command.clone());
        }
        command
    }

    /// Materialize an interaction, caching the entities it references
    ///
    /// Resolved users, members, and roles are written through the usual
    /// create paths. Resolved channels are partial objects lacking the
    /// fields a full channel carries; they are left uncached.
    pub fn create_interaction(&self, mut interaction: Interaction) -> Interaction {
        match (interaction.guild_id, interaction.member.take()) {
            (Some(guild_id), Some(member)) => {
                interaction.member = Some(self.create_member(guild_id, member));
            }
            (_, member) => {
                interaction.member = member;
                if let Some(user) = interaction.user.take() {
                    interaction.user = Some(self.create_user(user));
                }
            }
        }

        if let Some(data) = &interaction.data {
            if let Some(resolved) = &data.resolved {
                for user in resolved.users.values() {
                    self.create_user(user.clone());
                }
                if let Some(guild_id) = interaction.guild_id {
                    for (user_id, member) in &resolved.members {
                        let mut member = member.clone();
                        if member.user.is_none() {
                            // Resolved members omit the user; pair it up
                            // from the resolved users block.
                            member.user = resolved.users.get(user_id).cloned();
                        }
                        self.create_member(guild_id, member);
                    }
                    for role in resolved.roles.values() {
                        self.create_role(guild_id, role.clone());
                    }
                }
                if !resolved.channels.is_empty() {
                    debug!(
                        count = resolved.channels.len(),
                        "skipping partial resolved channels"
                    );
                }
            }
        }

        interaction
    }

    /// Rebuild a typed component tree from raw payloads
    ///
    /// Elements with an unrecognized discriminator tag are logged and
    /// omitted; the rest of the structure is kept.
    pub fn create_components(&self, payloads: &[ComponentPayload]) -> Vec<Component> {
        payloads
            .iter()
            .filter_map(|payload| self.create_component(payload))
            .collect()
    }

    fn create_component(&self, payload: &ComponentPayload) -> Option<Component> {
        match payload.component_kind() {
            Ok(ComponentKind::ActionRow) => Some(Component::ActionRow(ActionRow {
                components: self.create_components(&payload.components),
            })),
            Ok(ComponentKind::Button) => Some(Component::Button(Button {
                style: payload.style.unwrap_or_default(),
                label: payload.label.clone(),
                custom_id: payload.custom_id.clone(),
                url: payload.url.clone(),
                disabled: payload.disabled,
                emoji: payload.emoji.clone(),
            })),
            Err(err) => {
                warn!(error = %err, "dropping unknown component");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionStatus;

    fn ready_session() -> Arc<SessionState> {
        let session = Arc::new(SessionState::new());
        session.set_status(ConnectionStatus::Ready);
        session
    }

    fn builder() -> EntityBuilder {
        EntityBuilder::new(
            Arc::new(EntityCache::new()),
            CacheConfig::default(),
            ready_session(),
        )
    }

    #[test]
    fn test_create_user_caches_when_admitted() {
        let builder = builder();
        let user = builder.create_user(User::new(Snowflake::new(1), "alice"));
        assert_eq!(builder.cache().user(Snowflake::new(1)), Some(user));
    }

    #[test]
    fn test_never_policy_skips_cache() {
        let builder = EntityBuilder::new(
            Arc::new(EntityCache::new()),
            CacheConfig::disabled(),
            ready_session(),
        );
        builder.create_user(User::new(Snowflake::new(1), "alice"));
        assert!(builder.cache().user(Snowflake::new(1)).is_none());
    }

    #[test]
    fn test_while_connected_policy_consults_status() {
        let session = Arc::new(SessionState::new());
        let config = CacheConfig {
            users: CachePolicy::WhileConnected,
            ..CacheConfig::default()
        };
        let builder = EntityBuilder::new(Arc::new(EntityCache::new()), config, session.clone());

        builder.create_user(User::new(Snowflake::new(1), "offline"));
        assert!(builder.cache().user(Snowflake::new(1)).is_none());

        session.set_status(ConnectionStatus::Ready);
        builder.create_user(User::new(Snowflake::new(2), "online"));
        assert!(builder.cache().user(Snowflake::new(2)).is_some());
    }

    #[test]
    fn test_member_user_matches_cached_user() {
        let builder = builder();
        let guild_id = Snowflake::new(10);
        let member = GuildMember::new(guild_id, User::new(Snowflake::new(3), "bob"));
        let built = builder.create_member(guild_id, member);

        let cached_user = builder.cache().user(Snowflake::new(3)).unwrap();
        assert_eq!(built.user.as_ref(), Some(&cached_user));
        let cached_member = builder.cache().member(guild_id, Snowflake::new(3)).unwrap();
        assert_eq!(cached_member.user.as_ref(), Some(&cached_user));
    }

    #[test]
    fn test_message_links_author_and_member() {
        let builder = builder();
        let mut message = Message::new(Snowflake::new(100), Snowflake::new(5), "hi");
        message.guild_id = Some(Snowflake::new(10));
        message.author = Some(User::new(Snowflake::new(3), "bob"));
        message.member = Some(GuildMember {
            guild_id: None,
            user: None,
            nick: Some("bobby".to_string()),
            role_ids: Vec::new(),
            joined_at: None,
        });

        let built = builder.create_message(message);
        let member = built.member.as_ref().unwrap();
        assert_eq!(member.guild_id, Some(Snowflake::new(10)));
        assert_eq!(member.user.as_ref().map(|u| u.id), Some(Snowflake::new(3)));
        assert!(builder
            .cache()
            .member(Snowflake::new(10), Snowflake::new(3))
            .is_some());
    }

    #[test]
    fn test_interaction_resolved_channels_not_cached() {
        let builder = builder();
        let interaction: Interaction = serde_json::from_str(
            r#"{
                "id": "1", "type": 2, "guild_id": "10", "token": "t",
                "member": {"user": {"id": "3", "username": "bob"}},
                "data": {
                    "id": "20", "name": "ban",
                    "resolved": {
                        "users": {"4": {"id": "4", "username": "target"}},
                        "roles": {"5": {"id": "5", "name": "mods"}},
                        "channels": {"6": {"id": "6", "type": 0, "name": "partial"}}
                    }
                }
            }"#,
        )
        .unwrap();

        builder.create_interaction(interaction);
        assert!(builder.cache().user(Snowflake::new(4)).is_some());
        assert!(builder
            .cache()
            .role(Snowflake::new(10), Snowflake::new(5))
            .is_some());
        // Partial resolved channels stay out of the cache.
        assert!(builder.cache().channel(Snowflake::new(6)).is_none());
    }

    #[test]
    fn test_component_tree_skips_unknown_tags() {
        let builder = builder();
        let payloads: Vec<ComponentPayload> = serde_json::from_str(
            r#"[{"type": 1, "components": [
                {"type": 2, "style": 1, "label": "ok", "custom_id": "a"},
                {"type": 99},
                {"type": 2, "style": 2, "label": "no", "custom_id": "b"}
            ]}]"#,
        )
        .unwrap();

        let components = builder.create_components(&payloads);
        assert_eq!(components.len(), 1);
        match &components[0] {
            Component::ActionRow(row) => {
                assert_eq!(row.components.len(), 2);
                assert!(matches!(row.components[0], Component::Button(_)));
            }
            other => panic!("expected action row, got {other:?}"),
        }
    }
}
