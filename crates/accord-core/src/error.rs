//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("unknown component type: {0}")]
    UnknownComponentKind(u8),

    #[error("unknown channel type: {0}")]
    UnknownChannelKind(u8),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid snowflake: {0}")]
    InvalidSnowflake(String),
}
