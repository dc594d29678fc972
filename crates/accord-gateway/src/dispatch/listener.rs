//! Event listener registration

use crate::events::GatewayEvent;

/// Receiver of dispatched domain events
///
/// Implementations must not block for long: all listeners of one client
/// share a single delivery task, and delivery order is the frame arrival
/// order. Offload slow work to a separate task.
pub trait EventListener: Send + Sync {
    /// Called once per dispatched event, in arrival order
    fn on_event(&self, event: &GatewayEvent);
}

/// Adapter turning a closure into an [`EventListener`]
pub struct FnListener<F>(pub F);

impl<F> EventListener for FnListener<F>
where
    F: Fn(&GatewayEvent) + Send + Sync,
{
    fn on_event(&self, event: &GatewayEvent) {
        (self.0)(event);
    }
}

/// Handle returned by listener registration, used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub(crate) u64);
