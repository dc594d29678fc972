//! Guild, member, role, and emote lifecycle handlers

use super::{DispatchHandler, HandlerContext};
use crate::error::GatewayError;
use crate::events::{
    EmoteCreateEvent, EmoteDeleteEvent, EmoteUpdateEvent, EntityAction, EventType, GatewayEvent,
    GenericGuildEvent, GenericMemberEvent, GenericRoleEvent, GuildCreateEvent, GuildDeleteEvent,
    GuildUpdateEvent, MemberAddEvent, MemberRemoveEvent, MemberUpdateEvent, RoleCreateEvent,
    RoleDeleteEvent, RoleUpdateEvent,
};
use accord_core::{Emote, Guild, GuildMember, Role, Snowflake, User};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Handles GUILD_CREATE / GUILD_UPDATE / GUILD_DELETE
pub struct GuildHandler;

impl DispatchHandler for GuildHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[
            EventType::GuildCreate,
            EventType::GuildUpdate,
            EventType::GuildDelete,
        ]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        let guild: Guild = serde_json::from_value(data)?;
        let guild_id = guild.id;

        match event_type {
            EventType::GuildCreate => {
                let guild = ctx.builder.create_guild(guild);
                ctx.dispatcher.dispatch(GatewayEvent::Guild(GenericGuildEvent {
                    action: EntityAction::Created,
                    guild_id,
                    guild: Some(guild.clone()),
                }));
                ctx.dispatcher
                    .dispatch(GatewayEvent::GuildCreate(GuildCreateEvent { guild }));
            }
            EventType::GuildUpdate => {
                let old = ctx.cache().guild(guild_id);
                let guild = ctx.builder.create_guild(guild);
                ctx.dispatcher.dispatch(GatewayEvent::Guild(GenericGuildEvent {
                    action: EntityAction::Updated,
                    guild_id,
                    guild: Some(guild.clone()),
                }));
                ctx.dispatcher
                    .dispatch(GatewayEvent::GuildUpdate(GuildUpdateEvent { guild, old }));
            }
            _ => {
                let old = ctx.cache().guild(guild_id);
                // Members, roles, voice states, emotes, and channels of
                // the guild all go with it.
                ctx.cache().evict_guild(guild_id);
                ctx.dispatcher.dispatch(GatewayEvent::Guild(GenericGuildEvent {
                    action: EntityAction::Deleted,
                    guild_id,
                    guild: None,
                }));
                ctx.dispatcher
                    .dispatch(GatewayEvent::GuildDelete(GuildDeleteEvent {
                        guild_id,
                        unavailable: guild.unavailable,
                        old,
                    }));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct MemberRemovePayload {
    guild_id: Snowflake,
    user: User,
}

/// Handles GUILD_MEMBER_ADD / GUILD_MEMBER_UPDATE / GUILD_MEMBER_REMOVE
pub struct MemberHandler;

impl DispatchHandler for MemberHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[
            EventType::GuildMemberAdd,
            EventType::GuildMemberUpdate,
            EventType::GuildMemberRemove,
        ]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        if event_type == EventType::GuildMemberRemove {
            let payload: MemberRemovePayload = serde_json::from_value(data)?;
            let old = ctx
                .cache()
                .remove_member(payload.guild_id, payload.user.id);
            ctx.dispatcher
                .dispatch(GatewayEvent::Member(GenericMemberEvent {
                    action: EntityAction::Deleted,
                    guild_id: payload.guild_id,
                    user_id: Some(payload.user.id),
                }));
            ctx.dispatcher
                .dispatch(GatewayEvent::MemberRemove(MemberRemoveEvent {
                    guild_id: payload.guild_id,
                    user: payload.user,
                    old,
                }));
            return Ok(());
        }

        let member: GuildMember = serde_json::from_value(data)?;
        let Some(guild_id) = member.guild_id else {
            warn!("member frame without guild_id");
            return Ok(());
        };
        let user_id = member.user_id();

        if event_type == EventType::GuildMemberAdd {
            let member = ctx.builder.create_member(guild_id, member);
            ctx.dispatcher
                .dispatch(GatewayEvent::Member(GenericMemberEvent {
                    action: EntityAction::Created,
                    guild_id,
                    user_id,
                }));
            ctx.dispatcher
                .dispatch(GatewayEvent::MemberAdd(MemberAddEvent { guild_id, member }));
        } else {
            let old = user_id.and_then(|id| ctx.cache().member(guild_id, id));
            let member = ctx.builder.create_member(guild_id, member);
            ctx.dispatcher
                .dispatch(GatewayEvent::Member(GenericMemberEvent {
                    action: EntityAction::Updated,
                    guild_id,
                    user_id,
                }));
            ctx.dispatcher
                .dispatch(GatewayEvent::MemberUpdate(MemberUpdateEvent {
                    guild_id,
                    member,
                    old,
                }));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RolePayload {
    guild_id: Snowflake,
    role: Role,
}

#[derive(Debug, Deserialize)]
struct RoleDeletePayload {
    guild_id: Snowflake,
    role_id: Snowflake,
}

/// Handles GUILD_ROLE_CREATE / GUILD_ROLE_UPDATE / GUILD_ROLE_DELETE
pub struct RoleHandler;

impl DispatchHandler for RoleHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[
            EventType::GuildRoleCreate,
            EventType::GuildRoleUpdate,
            EventType::GuildRoleDelete,
        ]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        if event_type == EventType::GuildRoleDelete {
            let payload: RoleDeletePayload = serde_json::from_value(data)?;
            let role = ctx.cache().remove_role(payload.guild_id, payload.role_id);
            ctx.dispatcher.dispatch(GatewayEvent::Role(GenericRoleEvent {
                action: EntityAction::Deleted,
                guild_id: payload.guild_id,
                role_id: payload.role_id,
            }));
            ctx.dispatcher
                .dispatch(GatewayEvent::RoleDelete(RoleDeleteEvent {
                    guild_id: payload.guild_id,
                    role_id: payload.role_id,
                    role,
                }));
            return Ok(());
        }

        let payload: RolePayload = serde_json::from_value(data)?;
        let guild_id = payload.guild_id;
        let role_id = payload.role.id;

        if event_type == EventType::GuildRoleCreate {
            let role = ctx.builder.create_role(guild_id, payload.role);
            ctx.dispatcher.dispatch(GatewayEvent::Role(GenericRoleEvent {
                action: EntityAction::Created,
                guild_id,
                role_id,
            }));
            ctx.dispatcher
                .dispatch(GatewayEvent::RoleCreate(RoleCreateEvent { guild_id, role }));
        } else {
            let old = ctx.cache().role(guild_id, role_id);
            let role = ctx.builder.create_role(guild_id, payload.role);
            ctx.dispatcher.dispatch(GatewayEvent::Role(GenericRoleEvent {
                action: EntityAction::Updated,
                guild_id,
                role_id,
            }));
            ctx.dispatcher
                .dispatch(GatewayEvent::RoleUpdate(RoleUpdateEvent {
                    guild_id,
                    role,
                    old,
                }));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct EmotesUpdatePayload {
    guild_id: Snowflake,
    #[serde(rename = "emojis")]
    emotes: Vec<Emote>,
}

/// Handles GUILD_EMOJIS_UPDATE
///
/// The wire carries the full new emote list; created, updated, and
/// deleted emotes are derived by diffing against the cache.
pub struct EmotesUpdateHandler;

impl DispatchHandler for EmotesUpdateHandler {
    fn event_types(&self) -> &'static [EventType] {
        &[EventType::GuildEmotesUpdate]
    }

    fn handle(
        &self,
        ctx: &HandlerContext,
        _event_type: EventType,
        data: Value,
    ) -> Result<(), GatewayError> {
        let payload: EmotesUpdatePayload = serde_json::from_value(data)?;
        let guild_id = payload.guild_id;

        let mut seen = Vec::new();
        for emote in payload.emotes {
            let Some(emote_id) = emote.id else {
                // Unicode emotes never appear in guild emote lists.
                continue;
            };
            seen.push(emote_id);
            let old = ctx.cache().emote(guild_id, emote_id);
            let emote = ctx.builder.create_emote(guild_id, emote);
            match old {
                None => ctx
                    .dispatcher
                    .dispatch(GatewayEvent::EmoteCreate(EmoteCreateEvent {
                        guild_id,
                        emote,
                    })),
                Some(old) if old != emote => {
                    ctx.dispatcher
                        .dispatch(GatewayEvent::EmoteUpdate(EmoteUpdateEvent {
                            guild_id,
                            emote,
                            old,
                        }));
                }
                Some(_) => {}
            }
        }

        // Anything cached but absent from the new list was deleted.
        for emote in ctx.cache().guild_emotes(guild_id) {
            if let Some(emote_id) = emote.id {
                if !seen.contains(&emote_id) {
                    ctx.cache().remove_emote(guild_id, emote_id);
                    ctx.dispatcher
                        .dispatch(GatewayEvent::EmoteDelete(EmoteDeleteEvent {
                            guild_id,
                            emote,
                        }));
                }
            }
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
    async fn test_guild_delete_evicts_scoped_entities() {
        let ctx = ctx();
        GuildHandler
            .handle(
                &ctx,
                EventType::GuildCreate,
                serde_json::json!({"id": "10", "name": "home"}),
            )
            .unwrap();
        MemberHandler
            .handle(
                &ctx,
                EventType::GuildMemberAdd,
                serde_json::json!({
                    "guild_id": "10",
                    "user": {"id": "3", "username": "bob"},
                    "roles": [],
                }),
            )
            .unwrap();
        assert!(ctx.cache().member(Snowflake::new(10), Snowflake::new(3)).is_some());

        GuildHandler
            .handle(
                &ctx,
                EventType::GuildDelete,
                serde_json::json!({"id": "10", "unavailable": false}),
            )
            .unwrap();
        assert!(ctx.cache().guild(Snowflake::new(10)).is_none());
        assert!(ctx.cache().member(Snowflake::new(10), Snowflake::new(3)).is_none());
    }

    #[tokio::test]
    async fn test_member_remove_returns_old_snapshot() {
        let ctx = ctx();
        MemberHandler
            .handle(
                &ctx,
                EventType::GuildMemberAdd,
                serde_json::json!({
                    "guild_id": "10",
                    "user": {"id": "3", "username": "bob"},
                    "nick": "bobby",
                }),
            )
            .unwrap();
        MemberHandler
            .handle(
                &ctx,
                EventType::GuildMemberRemove,
                serde_json::json!({
                    "guild_id": "10",
                    "user": {"id": "3", "username": "bob"},
                }),
            )
            .unwrap();
        assert!(ctx.cache().member(Snowflake::new(10), Snowflake::new(3)).is_none());
    }

    #[tokio::test]
    async fn test_role_lifecycle() {
        let ctx = ctx();
        RoleHandler
            .handle(
                &ctx,
                EventType::GuildRoleCreate,
                serde_json::json!({
                    "guild_id": "10",
                    "role": {"id": "5", "name": "mods"},
                }),
            )
            .unwrap();
        let cached = ctx.cache().role(Snowflake::new(10), Snowflake::new(5)).unwrap();
        assert_eq!(cached.guild_id, Some(Snowflake::new(10)));

        RoleHandler
            .handle(
                &ctx,
                EventType::GuildRoleDelete,
                serde_json::json!({"guild_id": "10", "role_id": "5"}),
            )
            .unwrap();
        assert!(ctx.cache().role(Snowflake::new(10), Snowflake::new(5)).is_none());
    }

    #[tokio::test]
    async fn test_emote_diffing() {
        let ctx = ctx();
        EmotesUpdateHandler
            .handle(
                &ctx,
                EventType::GuildEmotesUpdate,
                serde_json::json!({
                    "guild_id": "10",
                    "emojis": [{"id": "1", "name": "blob"}, {"id": "2", "name": "wave"}],
                }),
            )
            .unwrap();
        assert!(ctx.cache().emote(Snowflake::new(10), Snowflake::new(1)).is_some());

        // Second update drops emote 1.
        EmotesUpdateHandler
            .handle(
                &ctx,
                EventType::GuildEmotesUpdate,
                serde_json::json!({
                    "guild_id": "10",
                    "emojis": [{"id": "2", "name": "wave"}],
                }),
            )
            .unwrap();
        assert!(ctx.cache().emote(Snowflake::new(10), Snowflake::new(1)).is_none());
        assert!(ctx.cache().emote(Snowflake::new(10), Snowflake::new(2)).is_some());
    }
}
