//! Client error types

mod client_error;

pub use client_error::ClientError;
