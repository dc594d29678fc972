//! Connection lifecycle: session state, backoff, and the manager itself

pub mod backoff;
pub mod gateway;
pub mod session;

pub use backoff::Backoff;
pub use gateway::Gateway;
pub use session::{ConnectionStatus, SessionState};
