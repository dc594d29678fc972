//! Guild, member, role, and emote lifecycle events

use super::EntityAction;
use accord_core::{Emote, Guild, GuildMember, Role, Snowflake, User};

/// Generic "a guild changed" event
#[derive(Debug, Clone)]
pub struct GenericGuildEvent {
    pub action: EntityAction,
    pub guild_id: Snowflake,
    pub guild: Option<Guild>,
}

/// A guild became visible to the client
#[derive(Debug, Clone)]
pub struct GuildCreateEvent {
    pub guild: Guild,
}

/// A guild was updated
#[derive(Debug, Clone)]
pub struct GuildUpdateEvent {
    pub guild: Guild,
    pub old: Option<Guild>,
}

/// A guild was deleted or became unavailable
///
/// All guild-scoped cache entries are evicted before this event fires.
#[derive(Debug, Clone)]
pub struct GuildDeleteEvent {
    pub guild_id: Snowflake,
    /// True for an outage, false for removal/ban
    pub unavailable: bool,
    /// Cached state before eviction, if it was cached
    pub old: Option<Guild>,
}

/// Generic "a member changed" event
#[derive(Debug, Clone)]
pub struct GenericMemberEvent {
    pub action: EntityAction,
    pub guild_id: Snowflake,
    pub user_id: Option<Snowflake>,
}

/// A user joined a guild
#[derive(Debug, Clone)]
pub struct MemberAddEvent {
    pub guild_id: Snowflake,
    pub member: GuildMember,
}

/// A guild membership was updated (nick, roles)
#[derive(Debug, Clone)]
pub struct MemberUpdateEvent {
    pub guild_id: Snowflake,
    pub member: GuildMember,
    pub old: Option<GuildMember>,
}

/// A user left (or was removed from) a guild
#[derive(Debug, Clone)]
pub struct MemberRemoveEvent {
    pub guild_id: Snowflake,
    pub user: User,
    /// Cached membership before removal, if it was cached
    pub old: Option<GuildMember>,
}

/// Generic "a role changed" event
#[derive(Debug, Clone)]
pub struct GenericRoleEvent {
    pub action: EntityAction,
    pub guild_id: Snowflake,
    pub role_id: Snowflake,
}

/// A role was created
#[derive(Debug, Clone)]
pub struct RoleCreateEvent {
    pub guild_id: Snowflake,
    pub role: Role,
}

/// A role was updated
#[derive(Debug, Clone)]
pub struct RoleUpdateEvent {
    pub guild_id: Snowflake,
    pub role: Role,
    pub old: Option<Role>,
}

/// A role was deleted
#[derive(Debug, Clone)]
pub struct RoleDeleteEvent {
    pub guild_id: Snowflake,
    pub role_id: Snowflake,
    /// Cached state before removal, if it was cached
    pub role: Option<Role>,
}

/// A custom emote was added to a guild
#[derive(Debug, Clone)]
pub struct EmoteCreateEvent {
    pub guild_id: Snowflake,
    pub emote: Emote,
}

/// A custom emote was changed
#[derive(Debug, Clone)]
pub struct EmoteUpdateEvent {
    pub guild_id: Snowflake,
    pub emote: Emote,
    pub old: Emote,
}

/// A custom emote was removed from a guild
#[derive(Debug, Clone)]
pub struct EmoteDeleteEvent {
    pub guild_id: Snowflake,
    pub emote: Emote,
}
