pub mod ai;
pub mod auth;
pub mod chat;
pub mod patient;
pub mod protocol;
pub mod therapist;
pub mod treatment;
pub mod user;

use serde::{Deserialize, Serialize};

/// Timestamps are naive UTC on the wire (`2025-11-16T10:30:00.123456`).
pub type DateTime = jiff::civil::DateTime;

/// Generic `{"message": "..."}` acknowledgement returned by delete/logout
/// style endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageAck {
    pub message: String,
}
