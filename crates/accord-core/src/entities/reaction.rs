//! Reaction entity - an aggregated emote reaction on a message

use serde::{Deserialize, Serialize};

use crate::entities::Emote;

/// Aggregated reaction count on a message
///
/// One entry per distinct emote; the gateway delivers per-user add and
/// remove notifications, which fold into these counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(rename = "emoji")]
    pub emote: Emote,
    #[serde(default)]
    pub count: i32,
    #[serde(default)]
    pub me: bool,
}

impl Reaction {
    /// Create a Reaction with a single reacting user
    pub fn new(emote: Emote) -> Self {
        Self {
            emote,
            count: 1,
            me: false,
        }
    }

    /// Check whether this entry counts the given emote
    ///
    /// Custom emotes compare by id; unicode emotes by name.
    pub fn matches(&self, emote: &Emote) -> bool {
        match (self.emote.id, emote.id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.emote.name == emote.name,
            _ => false,
        }
    }
}
