//! Listener registration and in-order event delivery

mod dispatcher;
mod listener;

pub use dispatcher::EventDispatcher;
pub use listener::{EventListener, FnListener, ListenerHandle};
