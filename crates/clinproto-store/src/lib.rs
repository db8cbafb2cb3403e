//! clinproto-store
//!
//! Client-side state: auth and protocol slices driven by async thunks, the
//! store that applies them, and the pre-screening chat and quiz flows.

pub mod error;
pub mod screening;
pub mod state;
pub mod store;

pub use state::{Action, AppState, AsyncStatus, AuthAction, AuthState, ProtocolAction, ProtocolState};
pub use store::Store;
