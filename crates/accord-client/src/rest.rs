//! REST collaborator contract
//!
//! The gateway pipeline never performs request/response calls itself.
//! Callers that need to fetch or mutate entities outside the event
//! stream supply an implementation of this trait; the library only
//! defines the interface.

use accord_core::{Channel, Guild, GuildMember, Message, Snowflake, User};
use async_trait::async_trait;

/// Typed failure surface of a REST collaborator
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    #[error("entity not found")]
    NotFound,

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Request/response operations on the platform's HTTP API
///
/// Implementations own verb routing, per-route throttling, and
/// retry-after handling. Must never be called from an event listener
/// that the dispatcher drives synchronously.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn fetch_user(&self, user_id: Snowflake) -> Result<User, RestError>;

    async fn fetch_guild(&self, guild_id: Snowflake) -> Result<Guild, RestError>;

    async fn fetch_channel(&self, channel_id: Snowflake) -> Result<Channel, RestError>;

    async fn fetch_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<GuildMember, RestError>;

    async fn create_message(
        &self,
        channel_id: Snowflake,
        content: &str,
    ) -> Result<Message, RestError>;

    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> Result<(), RestError>;
}
