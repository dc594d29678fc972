//! Member entity - a user's membership in a guild

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::value_objects::Snowflake;

/// Guild member entity (junction between User and Guild)
///
/// Identity is the pair (guild_id, user id). The wire payload usually omits
/// `guild_id`; the entity builder injects it from the surrounding event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default, rename = "roles")]
    pub role_ids: Vec<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

impl GuildMember {
    /// Create a GuildMember around an embedded user
    pub fn new(guild_id: Snowflake, user: User) -> Self {
        Self {
            guild_id: Some(guild_id),
            user: Some(user),
            nick: None,
            role_ids: Vec::new(),
            joined_at: None,
        }
    }

    /// The member's user id, if the user payload is present
    #[inline]
    pub fn user_id(&self) -> Option<Snowflake> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Get display name (nickname if set, otherwise the username)
    pub fn display_name(&self) -> Option<&str> {
        self.nick
            .as_deref()
            .or_else(|| self.user.as_ref().map(|u| u.username.as_str()))
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_nick() {
        let mut member = GuildMember::new(Snowflake::new(1), User::new(Snowflake::new(2), "ferris"));
        assert_eq!(member.display_name(), Some("ferris"));

        member.nick = Some("crab".to_string());
        assert_eq!(member.display_name(), Some("crab"));
    }

    #[test]
    fn test_member_roles() {
        let mut member = GuildMember::new(Snowflake::new(1), User::new(Snowflake::new(2), "ferris"));
        member.role_ids.push(Snowflake::new(100));
        assert!(member.has_role(Snowflake::new(100)));
        assert!(!member.has_role(Snowflake::new(101)));
    }

    #[test]
    fn test_member_wire_shape() {
        let member: GuildMember = serde_json::from_str(
            r#"{"user":{"id":"2","username":"ferris"},"roles":["100","101"],"nick":null}"#,
        )
        .unwrap();
        assert_eq!(member.user_id(), Some(Snowflake::new(2)));
        assert_eq!(member.role_ids.len(), 2);
        assert!(member.guild_id.is_none());
    }
}
