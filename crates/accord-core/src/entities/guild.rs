//! Guild entity - a server the client is a member of

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Guild entity
///
/// GUILD_DELETE carries only `{id, unavailable}`, so everything except the
/// id is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub unavailable: bool,
}

impl Guild {
    /// Create a Guild with required fields
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            icon: None,
            owner_id: None,
            member_count: None,
            unavailable: false,
        }
    }

    /// Check whether this is an outage/removal stub rather than a full guild
    #[inline]
    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }
}
