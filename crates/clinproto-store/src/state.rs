//! Slices and their reducers.
//!
//! Reducers are pure: they take the previous state by value and return the
//! next one. A fulfilled fetch replaces the collection outright; a rejected
//! one records the message and leaves the last good collection in place.

use clinproto_core::models::protocol::Protocol;
use clinproto_core::models::user::User;

/// Lifecycle of the most recent async call a slice issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AsyncStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl AsyncStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, AsyncStatus::Pending)
    }
}

// ── Auth slice ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub status: AsyncStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginPending,
    LoginFulfilled(User),
    LoginRejected(String),
    LoggedOut,
    /// Session restored from persisted credentials.
    UserLoaded(User),
}

impl AuthState {
    pub fn reduce(self, action: AuthAction) -> Self {
        match action {
            AuthAction::LoginPending => Self {
                status: AsyncStatus::Pending,
                error: None,
                ..self
            },
            AuthAction::LoginFulfilled(user) => Self {
                user: Some(user),
                is_authenticated: true,
                status: AsyncStatus::Fulfilled,
                error: None,
            },
            AuthAction::LoginRejected(message) => Self {
                user: None,
                is_authenticated: false,
                status: AsyncStatus::Rejected,
                error: Some(message),
            },
            AuthAction::LoggedOut => Self::default(),
            AuthAction::UserLoaded(user) => Self {
                user: Some(user),
                is_authenticated: true,
                ..self
            },
        }
    }
}

// ── Protocol slice ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolState {
    pub protocols: Vec<Protocol>,
    pub total: i64,
    pub selected: Option<Protocol>,
    pub status: AsyncStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolAction {
    FetchPending,
    FetchFulfilled { items: Vec<Protocol>, total: i64 },
    FetchRejected(String),
    SelectPending,
    SelectFulfilled(Protocol),
    SelectRejected(String),
    ClearSelected,
}

impl ProtocolState {
    pub fn reduce(self, action: ProtocolAction) -> Self {
        match action {
            ProtocolAction::FetchPending | ProtocolAction::SelectPending => Self {
                status: AsyncStatus::Pending,
                error: None,
                ..self
            },
            ProtocolAction::FetchFulfilled { items, total } => Self {
                protocols: items,
                total,
                status: AsyncStatus::Fulfilled,
                error: None,
                ..self
            },
            ProtocolAction::FetchRejected(message) | ProtocolAction::SelectRejected(message) => {
                Self {
                    status: AsyncStatus::Rejected,
                    error: Some(message),
                    ..self
                }
            }
            ProtocolAction::SelectFulfilled(protocol) => Self {
                selected: Some(protocol),
                status: AsyncStatus::Fulfilled,
                error: None,
                ..self
            },
            ProtocolAction::ClearSelected => Self {
                selected: None,
                ..self
            },
        }
    }
}

// ── Root ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub protocols: ProtocolState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Protocol(ProtocolAction),
}

impl Action {
    /// Stable name for logs, e.g. `auth/login/pending`.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Auth(a) => match a {
                AuthAction::LoginPending => "auth/login/pending",
                AuthAction::LoginFulfilled(_) => "auth/login/fulfilled",
                AuthAction::LoginRejected(_) => "auth/login/rejected",
                AuthAction::LoggedOut => "auth/logout",
                AuthAction::UserLoaded(_) => "auth/user_loaded",
            },
            Action::Protocol(p) => match p {
                ProtocolAction::FetchPending => "protocols/fetch/pending",
                ProtocolAction::FetchFulfilled { .. } => "protocols/fetch/fulfilled",
                ProtocolAction::FetchRejected(_) => "protocols/fetch/rejected",
                ProtocolAction::SelectPending => "protocols/select/pending",
                ProtocolAction::SelectFulfilled(_) => "protocols/select/fulfilled",
                ProtocolAction::SelectRejected(_) => "protocols/select/rejected",
                ProtocolAction::ClearSelected => "protocols/clear_selected",
            },
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<ProtocolAction> for Action {
    fn from(action: ProtocolAction) -> Self {
        Action::Protocol(action)
    }
}

impl AppState {
    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::Auth(a) => Self {
                auth: self.auth.reduce(a),
                ..self
            },
            Action::Protocol(p) => Self {
                protocols: self.protocols.reduce(p),
                ..self
            },
        }
    }
}
