//! Connection session state
//!
//! Session identity and heartbeat liveness shared between the read-loop
//! task and the heartbeat task of one connection.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::{Duration, Instant};

/// Lifecycle state of one gateway connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No connection attempt has been made yet (or teardown is complete)
    Unconnected,
    /// Opening the socket
    Connecting,
    /// Socket open, waiting for the Hello frame
    WaitingForHello,
    /// Identify sent, waiting for READY
    Identifying,
    /// Resume sent, waiting for RESUMED
    Resuming,
    /// Handshake request sent, awaiting server acknowledgment
    WaitingForReady,
    /// Steady state, dispatch frames flowing
    Ready,
    /// Recoverable disconnect, retrying with the session preserved
    Reconnecting,
    /// Terminal for the current attempt
    Disconnected,
}

impl ConnectionStatus {
    /// Check if the connection is past the handshake
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Get the name of this status
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unconnected => "Unconnected",
            Self::Connecting => "Connecting",
            Self::WaitingForHello => "WaitingForHello",
            Self::Identifying => "Identifying",
            Self::Resuming => "Resuming",
            Self::WaitingForReady => "WaitingForReady",
            Self::Ready => "Ready",
            Self::Reconnecting => "Reconnecting",
            Self::Disconnected => "Disconnected",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sequence sentinel meaning "no dispatch received yet"
const NO_SEQUENCE: i64 = -1;

/// Shared session state for one gateway connection
///
/// The read-loop task is the only writer of `sequence` and `session_id`;
/// the heartbeat task reads them without blocking the read loop. Both
/// survive reconnects so a Resume can be attempted.
#[derive(Debug)]
pub struct SessionState {
    /// Server-issued session id, captured from READY
    session_id: RwLock<Option<String>>,

    /// Last received dispatch sequence number (-1 until the first dispatch)
    sequence: AtomicI64,

    /// Current lifecycle status
    status: RwLock<ConnectionStatus>,

    /// Whether the last heartbeat was acknowledged
    heartbeat_acked: AtomicBool,

    /// When the last heartbeat was sent / acknowledged
    heartbeat_times: RwLock<HeartbeatTimes>,
}

#[derive(Debug, Default)]
struct HeartbeatTimes {
    sent: Option<Instant>,
    acked: Option<Instant>,
    latency: Option<Duration>,
}

impl SessionState {
    /// Create a fresh session with no identity
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: RwLock::new(None),
            sequence: AtomicI64::new(NO_SEQUENCE),
            status: RwLock::new(ConnectionStatus::Unconnected),
            heartbeat_acked: AtomicBool::new(true),
            heartbeat_times: RwLock::new(HeartbeatTimes::default()),
        }
    }

    /// Get the stored session id, if any
    #[must_use]
    pub fn session_id(&self) -> Option<String> {
        self.session_id.read().clone()
    }

    /// Store the session id captured from READY
    pub fn set_session_id(&self, id: impl Into<String>) {
        *self.session_id.write() = Some(id.into());
    }

    /// Last received sequence number, `None` until the first dispatch
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        let seq = self.sequence.load(Ordering::Acquire);
        u64::try_from(seq).ok()
    }

    /// Record a dispatch sequence number
    ///
    /// The stored value is monotonically non-decreasing; an out-of-order
    /// frame never moves it backwards.
    pub fn record_sequence(&self, seq: u64) {
        let seq = i64::try_from(seq).unwrap_or(i64::MAX);
        self.sequence.fetch_max(seq, Ordering::AcqRel);
    }

    /// Check if a Resume can be attempted
    #[must_use]
    pub fn can_resume(&self) -> bool {
        self.session_id.read().is_some() && self.sequence().is_some()
    }

    /// Discard session identity, forcing a fresh Identify on reconnect
    pub fn invalidate(&self) {
        *self.session_id.write() = None;
        self.sequence.store(NO_SEQUENCE, Ordering::Release);
    }

    /// Current lifecycle status
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        *self.status.read()
    }

    /// Transition to a new lifecycle status, returning the previous one
    pub fn set_status(&self, status: ConnectionStatus) -> ConnectionStatus {
        std::mem::replace(&mut *self.status.write(), status)
    }

    // === Heartbeat liveness ===

    /// Record that a heartbeat was sent and is awaiting acknowledgment
    pub fn record_heartbeat_sent(&self) {
        self.heartbeat_acked.store(false, Ordering::Release);
        self.heartbeat_times.write().sent = Some(Instant::now());
    }

    /// Record a heartbeat acknowledgment and update the latency estimate
    pub fn record_heartbeat_ack(&self) {
        self.heartbeat_acked.store(true, Ordering::Release);
        let mut times = self.heartbeat_times.write();
        let now = Instant::now();
        times.acked = Some(now);
        times.latency = times.sent.map(|sent| now.duration_since(sent));
    }

    /// Check whether the last heartbeat was acknowledged
    #[must_use]
    pub fn heartbeat_acked(&self) -> bool {
        self.heartbeat_acked.load(Ordering::Acquire)
    }

    /// Reset the ack flag for a fresh connection attempt
    pub fn reset_heartbeat(&self) {
        self.heartbeat_acked.store(true, Ordering::Release);
        *self.heartbeat_times.write() = HeartbeatTimes::default();
    }

    /// Round-trip latency of the last acknowledged heartbeat
    #[must_use]
    pub fn latency(&self) -> Option<Duration> {
        self.heartbeat_times.read().latency
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
