//! Emote entity - a custom or built-in emoji

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Emote entity
///
/// Built-in unicode emotes carry no id and are never cached; custom emotes
/// are scoped to their owning guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

impl Emote {
    /// Create a custom emote
    pub fn custom(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            guild_id: Some(guild_id),
            name: Some(name.into()),
            animated: false,
        }
    }

    /// Create a built-in unicode emote
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            guild_id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    /// Custom emotes have a platform-assigned id
    #[inline]
    pub fn is_custom(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_vs_unicode() {
        assert!(Emote::custom(Snowflake::new(1), Snowflake::new(2), "pog").is_custom());
        assert!(!Emote::unicode("thumbsup").is_custom());
    }
}
