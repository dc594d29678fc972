//! Gateway protocol definitions
//!
//! Defines the WebSocket protocol including op codes, frame envelope,
//! payloads, and close codes.

mod close_codes;
mod frames;
mod opcodes;
mod payloads;

pub use close_codes::CloseCode;
pub use frames::GatewayFrame;
pub use opcodes::OpCode;
pub use payloads::{
    ConnectionProperties, HelloPayload, IdentifyPayload, Intents, PresenceUpdatePayload,
    ReadyPayload, RequestGuildMembersPayload, ResumePayload, VoiceStateUpdatePayload,
};
