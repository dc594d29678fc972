//! # accord-gateway
//!
//! WebSocket gateway client: connection lifecycle, event ingestion,
//! and the entity builder feeding the cache.

pub mod builder;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod handlers;
pub mod protocol;

pub use builder::EntityBuilder;
pub use connection::{ConnectionStatus, Gateway, SessionState};
pub use dispatch::{EventDispatcher, EventListener, ListenerHandle};
pub use error::GatewayError;
pub use events::GatewayEvent;
pub use handlers::{HandlerContext, HandlerRegistry};
