//! clinproto-api
//!
//! Authenticated REST client for the protocol platform and the thin service
//! wrappers built on it.

pub mod client;
pub mod error;
pub mod services;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
