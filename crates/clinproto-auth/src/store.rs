use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clinproto_core::models::auth::TokenPair;
use clinproto_core::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AuthError;

/// The three persisted keys. Everything else the client knows is refetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Credentials {
    /// Authenticated means an access token is present. Expiry is only
    /// discovered when the server answers 401.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Replace both tokens. A refresh that omits the refresh token keeps
    /// the one we already hold.
    pub fn set_tokens(&mut self, pair: &TokenPair) {
        self.access_token = Some(pair.access_token.clone());
        if !pair.refresh_token.is_empty() {
            self.refresh_token = Some(pair.refresh_token.clone());
        }
    }
}

pub fn is_authenticated(credentials: &Credentials) -> bool {
    credentials.is_authenticated()
}

/// Durable home of the session's credentials.
///
/// `load` never fails: an unreadable store is an anonymous session.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Credentials;
    fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Credentials kept as one JSON file, written atomically with owner-only
/// permissions.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/clinproto/credentials.json`.
    pub fn default_location() -> Result<Self, AuthError> {
        let base = dirs::config_dir().ok_or(AuthError::NoConfigDir)?;
        Ok(Self::new(base.join("clinproto").join("credentials.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "credentials.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Credentials {
        if !self.path.exists() {
            return Credentials::default();
        }
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read credentials");
                return Credentials::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(creds) => creds,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt credentials file ignored");
                Credentials::default()
            }
        }
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(credentials)?;
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, &self.path)?;

        info!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            info!(path = %self.path.display(), "credentials cleared");
        }
        Ok(())
    }
}

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credentials: Credentials) -> Self {
        Self {
            inner: Mutex::new(credentials),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Credentials {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = credentials.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Credentials::default();
        Ok(())
    }
}
