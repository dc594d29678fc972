//! # accord-common
//!
//! Shared utilities: configuration loading, the client-facing error type,
//! and telemetry setup.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{ClientConfig, ConfigError, Environment, GatewaySettings};
pub use error::ClientError;
pub use telemetry::{init_tracing, init_tracing_with_config, TracingConfig};
