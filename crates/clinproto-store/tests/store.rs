use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use clinproto_api::services::protocols::ProtocolQuery;
use clinproto_api::{ApiClient, ApiConfig, ApiError};
use clinproto_auth::{CredentialStore, Credentials, MemoryCredentialStore};
use clinproto_store::{AsyncStatus, AuthState, ProtocolAction, Store};
use serde_json::{Value, json};

fn protocol_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Protocol {id}"),
        "version": "1.0",
        "status": "active",
        "therapy_type": "psilocybin",
        "condition_treated": "depression",
        "evidence_level": "phase_3_trial",
        "overview": null,
        "duration_weeks": 12,
        "total_sessions": 8,
        "created_at": "2025-11-16T10:30:00",
        "updated_at": null
    })
}

async fn list(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: i64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    if page == 1 {
        tokio::time::sleep(Duration::from_millis(150)).await;
    }
    Json(json!({
        "items": [protocol_json(page)],
        "total": page,
        "page": page,
        "size": 10
    }))
}

async fn detail(Path(id): Path<i64>) -> axum::response::Response {
    if id == 401 {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Token expired"}))).into_response();
    }
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Protocol not found"}))).into_response()
}

async fn login() -> Json<Value> {
    Json(json!({"access_token": "valid", "refresh_token": "r", "token_type": "bearer"}))
}

async fn me() -> Json<Value> {
    Json(json!({
        "id": 2,
        "email": "doc@example.com",
        "role": "therapist",
        "is_active": true,
        "created_at": "2025-01-02T03:04:05"
    }))
}

async fn logout() -> axum::response::Response {
    StatusCode::BAD_GATEWAY.into_response()
}

async fn spawn() -> String {
    let router = Router::new()
        .route("/api/v1/protocols", get(list))
        .route("/api/v1/protocols/{id}", get(detail))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/logout", post(logout));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn api(base_url: String) -> (ApiClient, Arc<MemoryCredentialStore>) {
    let creds = Arc::new(MemoryCredentialStore::new());
    let config = ApiConfig {
        base_url,
        ..ApiConfig::default()
    };
    (ApiClient::new(config, creds.clone()).unwrap(), creds)
}

#[tokio::test]
async fn last_fulfilled_fetch_wins() {
    let (api, _) = api(spawn().await);
    let store = Store::new();

    let slow = ProtocolQuery {
        page: Some(1),
        ..Default::default()
    };
    let fast = ProtocolQuery {
        page: Some(2),
        ..Default::default()
    };
    let (a, b) = tokio::join!(
        store.fetch_protocols(&api, &slow),
        store.fetch_protocols(&api, &fast)
    );
    a.unwrap();
    b.unwrap();

    // The page 1 response arrives last and overwrites page 2.
    let state = store.state();
    assert_eq!(state.protocols.total, 1);
    assert_eq!(state.protocols.protocols[0].id, 1);
}

#[tokio::test]
async fn subscribers_see_each_new_state() {
    let (api, _) = api(spawn().await);
    let store = Store::new();
    let mut rx = store.subscribe();

    let query = ProtocolQuery {
        page: Some(2),
        ..Default::default()
    };
    store.fetch_protocols(&api, &query).await.unwrap();

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.protocols.status, AsyncStatus::Fulfilled);
    assert_eq!(seen, store.state());
}

#[tokio::test]
async fn failed_select_records_banner() {
    let (api, _) = api(spawn().await);
    let store = Store::new();

    let err = store.select_protocol(&api, 404).await.unwrap_err();
    assert!(err.is_not_found());

    let state = store.state();
    assert_eq!(state.protocols.status, AsyncStatus::Rejected);
    assert_eq!(state.protocols.error.as_deref(), Some("Protocol not found"));
    assert!(state.protocols.selected.is_none());
}

#[tokio::test]
async fn login_then_logout() {
    let (api, creds) = api(spawn().await);
    let store = Store::new();

    let user = store.login(&api, "doc@example.com", "Str0ng!pass").await.unwrap();
    assert_eq!(user.id, 2);
    assert!(store.state().auth.is_authenticated);
    assert!(creds.load().is_authenticated());

    // The server fails the logout call; the session still ends.
    store.logout(&api).await.unwrap();
    assert!(!store.state().auth.is_authenticated);
    assert_eq!(creds.load(), Credentials::default());
}

fn therapist_session() -> Credentials {
    let user = serde_json::from_value(json!({
        "id": 2,
        "email": "doc@example.com",
        "role": "therapist",
        "is_active": true,
        "created_at": "2025-01-02T03:04:05"
    }))
    .unwrap();
    Credentials {
        access_token: Some("t".to_string()),
        refresh_token: None,
        user: Some(user),
    }
}

#[tokio::test]
async fn expired_session_in_a_thunk_signs_out() {
    let (api, creds) = api(spawn().await);
    let session = therapist_session();
    creds.save(&session).unwrap();
    let store = Store::new();
    assert!(store.restore_session(&session));

    // 401 with no refresh token stored.
    let err = store.select_protocol(&api, 401).await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired), "{err:?}");

    let state = store.state();
    assert_eq!(state.auth, AuthState::default());
    assert_eq!(state.protocols.status, AsyncStatus::Rejected);
    assert_eq!(
        state.protocols.error.as_deref(),
        Some("Your session has expired. Please sign in again.")
    );
    assert_eq!(creds.load(), Credentials::default());
    assert_eq!(*store.subscribe().borrow(), state);
}

#[test]
fn concurrent_dispatches_publish_the_final_state() {
    for _ in 0..200 {
        let store = Store::new();
        let rx = store.subscribe();

        std::thread::scope(|scope| {
            for total in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    store.dispatch(ProtocolAction::FetchFulfilled {
                        items: Vec::new(),
                        total,
                    });
                });
            }
        });

        assert_eq!(store.state(), *rx.borrow());
    }
}

#[test]
fn restore_session_needs_token_and_user() {
    let store = Store::new();
    assert!(!store.restore_session(&Credentials::default()));

    let creds = therapist_session();
    assert!(store.restore_session(&creds));
    assert_eq!(store.state().auth.user.map(|u| u.id), Some(2));
}
