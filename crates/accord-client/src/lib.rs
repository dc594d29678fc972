//! # accord-client
//!
//! High-level entry point: build a [`Client`], register listeners, and
//! open the gateway connection.
//!
//! ```no_run
//! use accord_client::ClientBuilder;
//! use accord_gateway::events::GatewayEvent;
//!
//! # async fn run() -> Result<(), accord_common::ClientError> {
//! let client = ClientBuilder::from_env()?.build();
//! client.on(|event| {
//!     if let GatewayEvent::MessageCreate(msg) = event {
//!         println!("{}", msg.message.content);
//!     }
//! });
//! client.run().await
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod rest;

pub use builder::ClientBuilder;
pub use client::Client;
pub use rest::{RestClient, RestError};
