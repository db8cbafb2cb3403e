use clinproto_api::services::protocols::ProtocolQuery;
use clinproto_api::services::{auth, protocols};
use clinproto_api::{ApiClient, ApiError};
use clinproto_auth::Credentials;
use clinproto_core::models::protocol::Protocol;
use clinproto_core::models::user::User;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::state::{Action, AppState, AuthAction, ProtocolAction};

/// Single-writer application store.
///
/// Every state change goes through [`Store::dispatch`]. Subscribers receive
/// each new state on a watch channel, which also owns the state, so the
/// published value is always the last one reduced. Thunks do not fence by
/// request: when two fetches overlap, whichever fulfils last is what the
/// state shows.
pub struct Store {
    tx: watch::Sender<AppState>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(initial: AppState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn state(&self) -> AppState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }

    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        let kind = action.kind();

        // Reduce and publish under the channel's write lock.
        self.tx.send_modify(|state| {
            *state = std::mem::take(state).reduce(action);
            debug!(
                action = kind,
                authenticated = state.auth.is_authenticated,
                protocols = state.protocols.protocols.len(),
                "dispatch"
            );
        });
    }

    // ── Auth thunks ─────────────────────────────────────────────────────────

    pub async fn login(&self, api: &ApiClient, email: &str, password: &str) -> Result<User, ApiError> {
        self.dispatch(AuthAction::LoginPending);
        match auth::login(api, email, password).await {
            Ok(user) => {
                self.dispatch(AuthAction::LoginFulfilled(user.clone()));
                Ok(user)
            }
            Err(e) => {
                self.dispatch(AuthAction::LoginRejected(e.user_message()));
                Err(e)
            }
        }
    }

    /// Always ends signed out, whatever the server answered.
    pub async fn logout(&self, api: &ApiClient) -> Result<(), ApiError> {
        let result = auth::logout(api).await;
        self.dispatch(AuthAction::LoggedOut);
        result
    }

    /// Rehydrate the auth slice from persisted credentials. Returns whether a
    /// session was restored.
    pub fn restore_session(&self, credentials: &Credentials) -> bool {
        match (&credentials.user, credentials.is_authenticated()) {
            (Some(user), true) => {
                info!(user_id = user.id, "session restored");
                self.dispatch(AuthAction::UserLoaded(user.clone()));
                true
            }
            _ => false,
        }
    }

    // ── Protocol thunks ─────────────────────────────────────────────────────

    pub async fn fetch_protocols(&self, api: &ApiClient, query: &ProtocolQuery) -> Result<(), ApiError> {
        self.dispatch(ProtocolAction::FetchPending);
        match protocols::list(api, query).await {
            Ok(list) => {
                self.dispatch(ProtocolAction::FetchFulfilled {
                    items: list.items,
                    total: list.total,
                });
                Ok(())
            }
            Err(e) => Err(self.reject_fetch(e)),
        }
    }

    pub async fn search_protocols(&self, api: &ApiClient, q: &str) -> Result<(), ApiError> {
        self.dispatch(ProtocolAction::FetchPending);
        match protocols::search(api, q).await {
            Ok(found) => {
                self.dispatch(ProtocolAction::FetchFulfilled {
                    items: found.items,
                    total: found.total,
                });
                Ok(())
            }
            Err(e) => Err(self.reject_fetch(e)),
        }
    }

    pub async fn select_protocol(&self, api: &ApiClient, id: i64) -> Result<Protocol, ApiError> {
        self.dispatch(ProtocolAction::SelectPending);
        match protocols::get(api, id).await {
            Ok(protocol) => {
                self.dispatch(ProtocolAction::SelectFulfilled(protocol.clone()));
                Ok(protocol)
            }
            Err(e) => {
                self.dispatch(ProtocolAction::SelectRejected(e.user_message()));
                self.sign_out_if_expired(&e);
                Err(e)
            }
        }
    }

    pub fn clear_selected(&self) {
        self.dispatch(ProtocolAction::ClearSelected);
    }

    fn reject_fetch(&self, e: ApiError) -> ApiError {
        self.dispatch(ProtocolAction::FetchRejected(e.user_message()));
        self.sign_out_if_expired(&e);
        e
    }

    /// The client has already cleared credentials; mirror that in state.
    fn sign_out_if_expired(&self, e: &ApiError) {
        if matches!(e, ApiError::SessionExpired) {
            self.dispatch(AuthAction::LoggedOut);
        }
    }
}
