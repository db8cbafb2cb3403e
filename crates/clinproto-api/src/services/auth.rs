use clinproto_auth::Credentials;
use clinproto_core::endpoints;
use clinproto_core::models::MessageAck;
use clinproto_core::models::auth::{LoginRequest, RegisterRequest, TokenPair};
use clinproto_core::models::user::{User, UserRole};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Exchange email/password for tokens, persist them, then fetch and cache
/// the signed-in user.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<User, ApiError> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let pair: TokenPair = client.post(endpoints::AUTH_LOGIN, &request).await?;

    let mut credentials = Credentials {
        access_token: Some(pair.access_token),
        refresh_token: Some(pair.refresh_token),
        user: None,
    };
    client.credentials().save(&credentials)?;

    let user = match me(client).await {
        Ok(user) => user,
        Err(e) => {
            // Tokens without a user would look like a half-open session.
            if let Err(clear_err) = client.credentials().clear() {
                warn!(error = %clear_err, "failed to clear credentials");
            }
            return Err(e);
        }
    };

    credentials.user = Some(user.clone());
    client.credentials().save(&credentials)?;
    info!(user_id = user.id, role = %user.role, "signed in");
    Ok(user)
}

pub async fn register(
    client: &ApiClient,
    email: &str,
    password: &str,
    role: UserRole,
) -> Result<User, ApiError> {
    let request = RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
        role,
    };
    let user: User = client.post(endpoints::AUTH_REGISTER, &request).await?;
    info!(user_id = user.id, role = %user.role, "registered");
    Ok(user)
}

pub async fn me(client: &ApiClient) -> Result<User, ApiError> {
    client.get(endpoints::AUTH_ME).await
}

/// Tell the server, then forget the session locally whatever the server
/// said.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    if let Err(e) = client.post_empty::<MessageAck>(endpoints::AUTH_LOGOUT).await {
        warn!(error = %e, "logout request failed, clearing local session anyway");
    }
    client.credentials().clear()?;
    info!("signed out");
    Ok(())
}
