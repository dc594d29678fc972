//! Gateway frame envelope
//!
//! Every message on the socket is one `GatewayFrame`: op code, optional
//! sequence number and event type (dispatch only), and a raw payload.

use super::{
    HelloPayload, IdentifyPayload, OpCode, PresenceUpdatePayload, RequestGuildMembersPayload,
    ResumePayload, VoiceStateUpdatePayload,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway frame envelope
///
/// Frames are ephemeral: constructed per inbound message and not
/// retained past handler dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayFrame {
    /// Operation code
    pub op: OpCode,

    /// Sequence number (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Event type (only for op=0 Dispatch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Event data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl GatewayFrame {
    fn control(op: OpCode, d: Option<Value>) -> Self {
        Self {
            op,
            s: None,
            t: None,
            d,
        }
    }

    // === Outbound (client) frames ===

    /// Create a Heartbeat frame (op=1) carrying the last sequence number
    #[must_use]
    pub fn heartbeat(last_sequence: Option<u64>) -> Self {
        Self::control(
            OpCode::Heartbeat,
            Some(last_sequence.map_or(Value::Null, |s| Value::Number(s.into()))),
        )
    }

    /// Create an Identify frame (op=2)
    #[must_use]
    pub fn identify(payload: &IdentifyPayload) -> Self {
        Self::control(
            OpCode::Identify,
            Some(serde_json::to_value(payload).unwrap_or_default()),
        )
    }

    /// Create a Resume frame (op=6)
    #[must_use]
    pub fn resume(payload: &ResumePayload) -> Self {
        Self::control(
            OpCode::Resume,
            Some(serde_json::to_value(payload).unwrap_or_default()),
        )
    }

    /// Create a Presence Update frame (op=3)
    #[must_use]
    pub fn presence_update(payload: &PresenceUpdatePayload) -> Self {
        Self::control(
            OpCode::PresenceUpdate,
            Some(serde_json::to_value(payload).unwrap_or_default()),
        )
    }

    /// Create a Voice State Update frame (op=4)
    #[must_use]
    pub fn voice_state_update(payload: &VoiceStateUpdatePayload) -> Self {
        Self::control(
            OpCode::VoiceStateUpdate,
            Some(serde_json::to_value(payload).unwrap_or_default()),
        )
    }

    /// Create a Request Guild Members frame (op=8)
    #[must_use]
    pub fn request_guild_members(payload: &RequestGuildMembersPayload) -> Self {
        Self::control(
            OpCode::RequestGuildMembers,
            Some(serde_json::to_value(payload).unwrap_or_default()),
        )
    }

    // === Parsing inbound (server) frames ===

    /// Try to parse as a Hello payload (op=10)
    #[must_use]
    pub fn as_hello(&self) -> Option<HelloPayload> {
        if self.op != OpCode::Hello {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Read the resumable flag of an Invalid Session frame (op=9)
    ///
    /// The `d` field is a bare boolean; a missing or malformed payload
    /// is treated as non-resumable.
    #[must_use]
    pub fn invalid_session_resumable(&self) -> bool {
        self.op == OpCode::InvalidSession
            && self.d.as_ref().and_then(Value::as_bool).unwrap_or(false)
    }

    /// Check if this is a dispatch frame
    #[must_use]
    pub fn is_dispatch(&self) -> bool {
        self.op == OpCode::Dispatch
    }

    /// The dispatch event type, if present
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.t.as_deref()
    }

    // === Utilities ===

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for GatewayFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(t) = &self.t {
            write!(f, "GatewayFrame(op={}, t={}", self.op, t)?;
            if let Some(s) = self.s {
                write!(f, ", s={s}")?;
            }
            write!(f, ")")
        } else {
            write!(f, "GatewayFrame(op={})", self.op)
        }
    }
}
