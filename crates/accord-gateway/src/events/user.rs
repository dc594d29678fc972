//! User and voice-state events

use accord_core::{User, VoiceState};

/// A user's profile changed
#[derive(Debug, Clone)]
pub struct UserUpdateEvent {
    pub user: User,
    pub old: Option<User>,
}

/// A user's voice connection changed
#[derive(Debug, Clone)]
pub struct VoiceStateUpdateEvent {
    pub state: VoiceState,
    pub old: Option<VoiceState>,
}
