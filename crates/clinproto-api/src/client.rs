use std::sync::Arc;
use std::time::Duration;

use clinproto_auth::CredentialStore;
use clinproto_core::endpoints;
use clinproto_core::models::auth::{RefreshRequest, TokenPair};
use reqwest::{Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API origin, e.g. `https://api.example.com`. Endpoint paths carry the
    /// `/api/v1` prefix themselves.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A request kept in replayable form so it can be sent a second time after
/// a token refresh.
#[derive(Debug, Clone)]
struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    fn with_query<K: Into<String>>(mut self, query: Vec<(K, String)>) -> Self {
        self.query = query.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// HTTP client that attaches the stored bearer token and performs a single
/// refresh-and-replay when the server answers 401.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("clinproto/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    // ── Typed helpers used by the services ──────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::GET, path);
        decode(self.execute(&request).await?).await
    }

    pub async fn get_with_query<T, K>(
        &self,
        path: &str,
        query: Vec<(K, String)>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        K: Into<String>,
    {
        let request = ApiRequest::new(Method::GET, path).with_query(query);
        decode(self.execute(&request).await?).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::POST, path).with_body(body)?;
        decode(self.execute(&request).await?).await
    }

    /// POST with no request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::POST, path);
        decode(self.execute(&request).await?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::PUT, path).with_body(body)?;
        decode(self.execute(&request).await?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::DELETE, path);
        decode(self.execute(&request).await?).await
    }

    // ── Refresh and replay ──────────────────────────────────────────────────

    async fn execute(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let response = self.dispatch(request).await?;
        if response.status() != StatusCode::UNAUTHORIZED
            || endpoints::is_credential_exchange(&request.path)
        {
            return Ok(response);
        }

        info!(path = %request.path, "access token rejected, refreshing");
        self.refresh().await?;

        let replay = self.dispatch(request).await?;
        if replay.status() == StatusCode::UNAUTHORIZED {
            warn!(path = %request.path, "replay rejected after refresh");
            self.expire();
            return Err(ApiError::SessionExpired);
        }
        Ok(replay)
    }

    /// Exchange the stored refresh token for a new pair. Any failure ends
    /// the session.
    async fn refresh(&self) -> Result<(), ApiError> {
        let mut credentials = self.credentials.load();
        let Some(refresh_token) = credentials.refresh_token.clone() else {
            info!("no refresh token stored");
            self.expire();
            return Err(ApiError::SessionExpired);
        };

        let request = ApiRequest::new(Method::POST, endpoints::AUTH_REFRESH)
            .with_body(&RefreshRequest { refresh_token })?;

        let pair = match self.dispatch(&request).await {
            Ok(response) if response.status().is_success() => {
                response.json::<TokenPair>().await.ok()
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "token refresh rejected");
                None
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed");
                None
            }
        };

        let Some(pair) = pair else {
            self.expire();
            return Err(ApiError::SessionExpired);
        };

        credentials.set_tokens(&pair);
        self.credentials.save(&credentials)?;
        info!("access token refreshed");
        Ok(())
    }

    fn expire(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!(error = %e, "failed to clear credentials");
        }
    }

    // ── Transport ───────────────────────────────────────────────────────────

    fn url(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, request.path);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let url = self.url(request)?;
        let request_id = Uuid::new_v4();

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header("X-Request-Id", request_id.to_string());
        if let Some(token) = self.credentials.load().access_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(%request_id, method = %request.method, path = %request.path, "request");
        let response = builder.send().await?;
        debug!(%request_id, status = response.status().as_u16(), "response");
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        let body = String::from_utf8_lossy(&bytes);
        return Err(ApiError::from_response(status, &body));
    }
    Ok(serde_json::from_slice(&bytes)?)
}
