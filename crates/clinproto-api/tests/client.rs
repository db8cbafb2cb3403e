use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use clinproto_api::services::{auth, protocols, therapist};
use clinproto_api::{ApiClient, ApiConfig, ApiError};
use clinproto_auth::{CredentialStore, Credentials, MemoryCredentialStore};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Stub {
    refreshes: Arc<AtomicUsize>,
    logouts: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<(Option<String>, bool)>>>,
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "email": "doc@example.com",
        "role": "therapist",
        "is_active": true,
        "created_at": "2025-01-02T03:04:05"
    })
}

fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn me(State(stub): State<Stub>, headers: HeaderMap) -> axum::response::Response {
    let auth = bearer(&headers);
    stub.seen
        .lock()
        .unwrap()
        .push((auth.clone(), headers.contains_key("x-request-id")));
    match auth.as_deref() {
        Some("Bearer fresh") | Some("Bearer valid") => Json(user_json()).into_response(),
        _ => unauthorized(),
    }
}

async fn refresh(State(stub): State<Stub>, Json(body): Json<Value>) -> axum::response::Response {
    stub.refreshes.fetch_add(1, Ordering::SeqCst);
    if body["refresh_token"] == "good-refresh" {
        Json(json!({
            "access_token": "fresh",
            "refresh_token": "rotated",
            "token_type": "bearer"
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid refresh token"})),
        )
            .into_response()
    }
}

async fn login(Json(body): Json<Value>) -> axum::response::Response {
    if body["password"] == "Str0ng!pass" {
        Json(json!({
            "access_token": "valid",
            "refresh_token": "good-refresh",
            "token_type": "bearer"
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect email or password"})),
        )
            .into_response()
    }
}

async fn logout(State(stub): State<Stub>) -> axum::response::Response {
    stub.logouts.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
}

async fn protocol_list(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: i64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let total = if params.get("therapy_type").map(String::as_str) == Some("ketamine") {
        3
    } else {
        0
    };
    Json(json!({"items": [], "total": total, "page": page, "size": 10}))
}

async fn always_unauthorized() -> axum::response::Response {
    unauthorized()
}

async fn validation_error() -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"detail": [{"loc": ["query", "q"], "msg": "field required", "type": "missing"}]})),
    )
        .into_response()
}

async fn spawn(stub: Stub) -> String {
    let router = Router::new()
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/protocols", get(protocol_list))
        .route("/api/v1/protocols/search", get(validation_error))
        .route("/api/v1/therapist/dashboard", get(always_unauthorized))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String, credentials: Credentials) -> (ApiClient, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::with(credentials));
    let config = ApiConfig {
        base_url,
        ..ApiConfig::default()
    };
    let client = ApiClient::new(config, store.clone()).unwrap();
    (client, store)
}

fn tokens(access: &str, refresh: Option<&str>) -> Credentials {
    Credentials {
        access_token: Some(access.to_string()),
        refresh_token: refresh.map(str::to_string),
        user: None,
    }
}

#[tokio::test]
async fn attaches_bearer_and_request_id() {
    let stub = Stub::default();
    let (client, _) = client(spawn(stub.clone()).await, tokens("valid", None));

    let user = auth::me(&client).await.unwrap();
    assert_eq!(user.email, "doc@example.com");

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.as_slice(), [(Some("Bearer valid".to_string()), true)]);
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed() {
    let stub = Stub::default();
    let (client, store) = client(spawn(stub.clone()).await, tokens("stale", Some("good-refresh")));

    let user = auth::me(&client).await.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(stub.refreshes.load(Ordering::SeqCst), 1);

    let saved = store.load();
    assert_eq!(saved.access_token.as_deref(), Some("fresh"));
    assert_eq!(saved.refresh_token.as_deref(), Some("rotated"));

    let seen = stub.seen.lock().unwrap();
    let auths: Vec<_> = seen.iter().map(|(a, _)| a.clone().unwrap_or_default()).collect();
    assert_eq!(auths, ["Bearer stale", "Bearer fresh"]);
}

#[tokio::test]
async fn rejected_refresh_clears_credentials() {
    let stub = Stub::default();
    let (client, store) = client(spawn(stub.clone()).await, tokens("stale", Some("revoked")));

    let err = auth::me(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(stub.refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(store.load(), Credentials::default());
}

#[tokio::test]
async fn missing_refresh_token_expires_without_calling_refresh() {
    let stub = Stub::default();
    let (client, store) = client(spawn(stub.clone()).await, tokens("stale", None));

    let err = auth::me(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(stub.refreshes.load(Ordering::SeqCst), 0);
    assert!(!store.load().is_authenticated());
}

#[tokio::test]
async fn replay_is_attempted_only_once() {
    let stub = Stub::default();
    let (client, store) = client(spawn(stub.clone()).await, tokens("stale", Some("good-refresh")));

    let err = therapist::dashboard(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(stub.refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(store.load(), Credentials::default());
}

#[tokio::test]
async fn failed_login_does_not_refresh() {
    let stub = Stub::default();
    let (client, store) = client(
        spawn(stub.clone()).await,
        tokens("whatever", Some("good-refresh")),
    );

    let err = auth::login(&client, "doc@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message(), "Incorrect email or password");
    assert_eq!(stub.refreshes.load(Ordering::SeqCst), 0);
    assert!(store.load().is_authenticated());
}

#[tokio::test]
async fn login_persists_tokens_and_user() {
    let stub = Stub::default();
    let (client, store) = client(spawn(stub).await, Credentials::default());

    let user = auth::login(&client, "doc@example.com", "Str0ng!pass")
        .await
        .unwrap();

    let saved = store.load();
    assert_eq!(saved.access_token.as_deref(), Some("valid"));
    assert_eq!(saved.refresh_token.as_deref(), Some("good-refresh"));
    assert_eq!(saved.user, Some(user));
}

#[tokio::test]
async fn logout_clears_even_when_server_errors() {
    let stub = Stub::default();
    let (client, store) = client(spawn(stub.clone()).await, tokens("valid", Some("good-refresh")));

    auth::logout(&client).await.unwrap();
    assert_eq!(stub.logouts.load(Ordering::SeqCst), 1);
    assert_eq!(store.load(), Credentials::default());
}

#[tokio::test]
async fn logout_clears_when_server_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (client, store) = client(format!("http://{addr}"), tokens("valid", Some("good-refresh")));
    auth::logout(&client).await.unwrap();
    assert_eq!(store.load(), Credentials::default());
}

#[tokio::test]
async fn catalogue_filters_go_on_the_query_string() {
    let stub = Stub::default();
    let (client, _) = client(spawn(stub).await, Credentials::default());

    let query = protocols::ProtocolQuery {
        page: Some(2),
        therapy_type: Some(clinproto_core::models::protocol::TherapyType::Ketamine),
        ..Default::default()
    };
    let list = protocols::list(&client, &query).await.unwrap();
    assert_eq!(list.page, 2);
    assert_eq!(list.total, 3);
}

#[test]
fn catalogue_query_has_no_status_filter() {
    let query = protocols::ProtocolQuery {
        page: Some(1),
        size: Some(10),
        therapy_type: Some(clinproto_core::models::protocol::TherapyType::Psilocybin),
        condition: Some("depression".to_string()),
        evidence_level: Some(clinproto_core::models::protocol::EvidenceLevel::Phase3),
    };
    let keys: Vec<_> = query.query_pairs().into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        ["page", "size", "therapy_type", "condition", "evidence_level"]
    );
}

#[tokio::test]
async fn validation_detail_uses_first_message() {
    let stub = Stub::default();
    let (client, _) = client(spawn(stub).await, Credentials::default());

    let err = protocols::search(&client, "").await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.user_message(), "field required");
}
