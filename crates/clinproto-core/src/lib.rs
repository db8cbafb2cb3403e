//! clinproto-core
//!
//! Pure domain types, form validation, and REST path conventions.
//! No HTTP dependency. This is the shared vocabulary of the clinproto client.

pub mod display;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod validation;
