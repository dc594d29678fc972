//! Event dispatcher
//!
//! Fans dispatched events out to registered listeners. Events are queued
//! on an unbounded ordered channel and drained by one dedicated task, so
//! a slow listener can never stall the socket read loop (and therefore
//! never starves the heartbeat).

use super::listener::{EventListener, FnListener, ListenerHandle};
use crate::events::GatewayEvent;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::trace;

struct Registry {
    listeners: RwLock<Vec<(u64, Arc<dyn EventListener>)>>,
    next_id: AtomicU64,
}

impl Registry {
    fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn add(&self, listener: Arc<dyn EventListener>) -> ListenerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.write().push((id, listener));
        ListenerHandle(id)
    }

    fn remove(&self, handle: ListenerHandle) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != handle.0);
        listeners.len() != before
    }

    /// Stable snapshot, so listeners registered or removed mid-delivery
    /// do not perturb the iteration.
    fn snapshot(&self) -> Vec<Arc<dyn EventListener>> {
        self.listeners
            .read()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect()
    }
}

/// Orders and delivers domain events to registered listeners
pub struct EventDispatcher {
    registry: Arc<Registry>,
    queue: mpsc::UnboundedSender<Arc<GatewayEvent>>,
}

impl EventDispatcher {
    /// Create a dispatcher and spawn its delivery task
    #[must_use]
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());
        let (queue, mut rx) = mpsc::unbounded_channel::<Arc<GatewayEvent>>();

        let drain_registry = Arc::clone(&registry);
        tokio::spawn(async move {
            // Single consumer: preserves the order events were queued in.
            while let Some(event) = rx.recv().await {
                trace!(event = event.name(), "delivering event");
                for listener in drain_registry.snapshot() {
                    listener.on_event(&event);
                }
            }
        });

        Self { registry, queue }
    }

    /// Register a listener, returning a handle for later removal
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) -> ListenerHandle {
        self.registry.add(listener)
    }

    /// Register a closure listener
    pub fn on<F>(&self, f: F) -> ListenerHandle
    where
        F: Fn(&GatewayEvent) + Send + Sync + 'static,
    {
        self.add_listener(Arc::new(FnListener(f)))
    }

    /// Remove a previously registered listener
    ///
    /// Returns false if the handle was already removed.
    pub fn remove_listener(&self, handle: ListenerHandle) -> bool {
        self.registry.remove(handle)
    }

    /// Number of registered listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.listeners.read().len()
    }

    /// Queue an event for in-order delivery
    ///
    /// Never blocks; the event reaches every listener registered at
    /// delivery time.
    pub fn dispatch(&self, event: GatewayEvent) {
        // Send only fails when the delivery task is gone, i.e. at shutdown.
        let _ = self.queue.send(Arc::new(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
