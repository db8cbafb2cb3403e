//! clinproto-auth
//!
//! Persisted credentials (access token, refresh token, cached user) and a
//! read-only view of the access token's claims.

pub mod claims;
pub mod error;
pub mod store;

pub use store::{CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore};
