//! Integration test utilities for the gateway client
//!
//! Provides a loopback mock gateway server and payload fixtures for
//! end-to-end and pipeline tests.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
