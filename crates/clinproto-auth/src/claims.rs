use jsonwebtoken::dangerous::insecure_decode;
use serde::Deserialize;

use clinproto_core::models::user::UserRole;

use crate::error::AuthError;

/// Payload of an access or refresh token as issued by the server.
///
/// Read without verifying the signature: the client only uses it to show who
/// is signed in and to skip an obviously expired token. The server remains
/// the only authority.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// The user's email.
    pub sub: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Seconds since the Unix epoch.
    pub exp: i64,
    /// `access` or `refresh`.
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
}

impl TokenClaims {
    pub fn is_expired(&self, now: jiff::Timestamp) -> bool {
        now.as_second() >= self.exp
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type.as_deref() == Some("refresh")
    }
}

pub fn peek(token: &str) -> Result<TokenClaims, AuthError> {
    let data = insecure_decode::<TokenClaims>(token)?;
    Ok(data.claims)
}
