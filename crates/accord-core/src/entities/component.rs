//! Message components - nested layout elements with discriminator tags
//!
//! The wire carries components as a uniform shape (`ComponentPayload`) with
//! a numeric `type` tag; the entity builder rebuilds them into the typed
//! `Component` tree, skipping elements with tags it does not recognize.

use serde::{Deserialize, Serialize};

use crate::entities::Emote;
use crate::error::DomainError;

/// Component discriminator tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComponentKind {
    /// Horizontal row containing child components
    ActionRow = 1,
    /// Clickable button
    Button = 2,
}

impl ComponentKind {
    /// Create a `ComponentKind` from the raw wire tag
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::ActionRow),
            2 => Some(Self::Button),
            _ => None,
        }
    }
}

/// Raw component shape as deserialized from a message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPayload {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emote>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentPayload>,
}

/// A typed component tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
}

impl Component {
    /// The node's discriminator tag
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::ActionRow(_) => ComponentKind::ActionRow,
            Self::Button(_) => ComponentKind::Button,
        }
    }
}

/// Row of child components
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionRow {
    pub components: Vec<Component>,
}

/// Clickable button component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub style: u8,
    pub label: Option<String>,
    pub custom_id: Option<String>,
    pub url: Option<String>,
    pub disabled: bool,
    pub emoji: Option<Emote>,
}

impl ComponentPayload {
    /// Interpret the raw tag, failing on unrecognized values
    pub fn component_kind(&self) -> Result<ComponentKind, DomainError> {
        ComponentKind::from_u8(self.kind).ok_or(DomainError::UnknownComponentKind(self.kind))
    }
}
