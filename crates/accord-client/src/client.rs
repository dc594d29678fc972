//! The high-level client
//!
//! Owns the cache, the dispatcher, and the gateway connection manager.
//! Constructed through [`ClientBuilder`](crate::ClientBuilder).

use crate::rest::RestClient;
use accord_cache::EntityCache;
use accord_common::{ClientConfig, ClientError};
use accord_core::User;
use accord_gateway::connection::{ConnectionStatus, Gateway, SessionState};
use accord_gateway::dispatch::{EventDispatcher, EventListener, ListenerHandle};
use accord_gateway::error::GatewayError;
use accord_gateway::events::GatewayEvent;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Gateway client with cache and listener registry
pub struct Client {
    config: ClientConfig,
    cache: Arc<EntityCache>,
    dispatcher: Arc<EventDispatcher>,
    session: Arc<SessionState>,
    gateway: Arc<Gateway>,
    rest: Option<Arc<dyn RestClient>>,
    self_user: Arc<RwLock<Option<User>>>,
    run_task: RwLock<Option<JoinHandle<Result<(), GatewayError>>>>,
}

impl Client {
    pub(crate) fn new(
        config: ClientConfig,
        cache: Arc<EntityCache>,
        dispatcher: Arc<EventDispatcher>,
        session: Arc<SessionState>,
        gateway: Arc<Gateway>,
        rest: Option<Arc<dyn RestClient>>,
    ) -> Self {
        let self_user = Arc::new(RwLock::new(None));
        let slot = Arc::clone(&self_user);
        // Track our own identity from the handshake and later updates.
        dispatcher.on(move |event| match event {
            GatewayEvent::Ready(ready) => {
                *slot.write() = Some(ready.user.clone());
            }
            GatewayEvent::UserUpdate(update) => {
                *slot.write() = Some(update.user.clone());
            }
            _ => {}
        });
        Self {
            config,
            cache,
            dispatcher,
            session,
            gateway,
            rest,
            self_user,
            run_task: RwLock::new(None),
        }
    }

    /// The shared entity cache
    #[must_use]
    pub fn cache(&self) -> &Arc<EntityCache> {
        &self.cache
    }

    /// The gateway connection manager
    #[must_use]
    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// The REST collaborator, when one was supplied
    #[must_use]
    pub fn rest(&self) -> Option<&Arc<dyn RestClient>> {
        self.rest.as_ref()
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current connection status
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.session.status()
    }

    /// Last measured heartbeat round-trip
    #[must_use]
    pub fn latency(&self) -> Option<Duration> {
        self.gateway.latency()
    }

    /// The authenticated user, once READY has arrived
    #[must_use]
    pub fn self_user(&self) -> Option<User> {
        self.self_user.read().clone()
    }

    /// Register a listener; events arrive in gateway frame order
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) -> ListenerHandle {
        self.dispatcher.add_listener(listener)
    }

    /// Register a closure listener
    pub fn on<F>(&self, f: F) -> ListenerHandle
    where
        F: Fn(&GatewayEvent) + Send + Sync + 'static,
    {
        self.dispatcher.on(f)
    }

    /// Remove a previously registered listener
    pub fn remove_listener(&self, handle: ListenerHandle) -> bool {
        self.dispatcher.remove_listener(handle)
    }

    /// Open the gateway connection on a background task
    pub fn connect(&self) {
        let gateway = Arc::clone(&self.gateway);
        info!(url = %self.config.gateway.url, "opening gateway connection");
        *self.run_task.write() = Some(tokio::spawn(async move { gateway.run().await }));
    }

    /// Run the gateway connection on the current task until it ends
    pub async fn run(&self) -> Result<(), ClientError> {
        self.gateway.run().await.map_err(map_gateway_error)
    }

    /// Signal shutdown and wait for the background connection to finish
    pub async fn close(&self) -> Result<(), ClientError> {
        self.gateway.close();
        let task = self.run_task.write().take();
        if let Some(task) = task {
            match task.await {
                Ok(result) => result.map_err(map_gateway_error)?,
                Err(join_err) => {
                    return Err(ClientError::Internal(anyhow::anyhow!(join_err)));
                }
            }
        }
        Ok(())
    }
}

fn map_gateway_error(err: GatewayError) -> ClientError {
    match err {
        GatewayError::AuthenticationFailed => ClientError::AuthenticationFailed,
        GatewayError::ReconnectExhausted { attempts } => {
            ClientError::ReconnectExhausted { attempts }
        }
        other => ClientError::Connection(other.to_string()),
    }
}
