//! Client assembly

use crate::client::Client;
use crate::rest::RestClient;
use accord_cache::{CacheConfig, EntityCache};
use accord_common::{ClientConfig, ClientError};
use accord_gateway::connection::{Gateway, SessionState};
use accord_gateway::dispatch::{EventDispatcher, EventListener};
use accord_gateway::handlers::{HandlerContext, HandlerRegistry};
use accord_gateway::protocol::Intents;
use accord_gateway::EntityBuilder;
use std::sync::Arc;

/// Assembles a [`Client`] from configuration, cache policy, and listeners
pub struct ClientBuilder {
    config: ClientConfig,
    cache_config: CacheConfig,
    listeners: Vec<Arc<dyn EventListener>>,
    rest: Option<Arc<dyn RestClient>>,
}

impl ClientBuilder {
    /// Start from a token, defaults for everything else
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(token))
    }

    /// Start from a full configuration
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            cache_config: CacheConfig::default(),
            listeners: Vec::new(),
            rest: None,
        }
    }

    /// Load configuration from ACCORD_* environment variables
    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    /// Override the gateway endpoint
    #[must_use]
    pub fn gateway_url(mut self, url: impl Into<String>) -> Self {
        self.config.gateway.url = url.into();
        self
    }

    /// Set the requested intent bitmask
    #[must_use]
    pub fn intents(mut self, intents: Intents) -> Self {
        self.config.gateway.intents = intents.bits();
        self
    }

    /// Replace the per-kind cache policies
    #[must_use]
    pub fn cache_config(mut self, cache_config: CacheConfig) -> Self {
        self.cache_config = cache_config;
        self
    }

    /// Register a listener before the connection opens
    #[must_use]
    pub fn listener(mut self, listener: Arc<dyn EventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Supply the REST collaborator
    #[must_use]
    pub fn rest(mut self, rest: Arc<dyn RestClient>) -> Self {
        self.rest = Some(rest);
        self
    }

    /// Wire cache, builder, dispatcher, handler registry, and gateway
    #[must_use]
    pub fn build(self) -> Client {
        let cache = Arc::new(EntityCache::new());
        let session = Arc::new(SessionState::new());
        let dispatcher = Arc::new(EventDispatcher::new());
        for listener in self.listeners {
            dispatcher.add_listener(listener);
        }

        let entity_builder = Arc::new(EntityBuilder::new(
            Arc::clone(&cache),
            self.cache_config,
            Arc::clone(&session),
        ));
        let ctx = Arc::new(HandlerContext::new(
            entity_builder,
            Arc::clone(&dispatcher),
        ));
        let registry = Arc::new(HandlerRegistry::with_defaults());

        let gateway = Arc::new(Gateway::new(
            self.config.token.clone(),
            self.config.gateway.clone(),
            Arc::clone(&session),
            registry,
            ctx,
        ));

        Client::new(self.config, cache, dispatcher, session, gateway, self.rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_gateway::connection::ConnectionStatus;

    #[tokio::test]
    async fn test_build_starts_unconnected() {
        let client = ClientBuilder::new("test-token")
            .gateway_url("ws://127.0.0.1:1/")
            .intents(Intents::unprivileged())
            .build();
        assert_eq!(client.status(), ConnectionStatus::Unconnected);
        assert!(client.self_user().is_none());
        assert_eq!(client.cache().user_count(), 0);
    }

    #[tokio::test]
    async fn test_builder_listener_registered() {
        let client = ClientBuilder::new("test-token")
            .listener(Arc::new(accord_gateway::dispatch::FnListener(
                |_event: &accord_gateway::events::GatewayEvent| {},
            )))
            .build();
        // One from the builder, one internal self-user tracker.
        drop(client);
    }
}
