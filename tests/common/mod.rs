#![allow(dead_code)]

//! Fake identity service for integration tests.
//!
//! Serves `GET /api/v1/auth/me` (and `GET /elsewhere`, counted as a hit too) on an ephemeral loopback port and answers by token:
//!
//! | token           | answer                                              |
//! |-----------------|-----------------------------------------------------|
//! | `good`          | 200, `orders:view`                                  |
//! | `manager`       | 200, `orders:view` + `orders:manage`                |
//! | `nobody`        | 200, no permissions                                 |
//! | `garbage`       | 200, body that is not a user record                 |
//! | `no-perms`      | 200, JSON without `permissions`                     |
//! | `broken`        | 500                                                 |
//! | `maintenance`   | 503                                                 |
//! | `slow`          | 200 as `good`, after `SLOW_RESPONSE_DELAY`          |
//! | `redirect`      | 307 to `/elsewhere`, which answers 200 `orders:manage` |
//! | anything else   | 401                                                 |

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use orders_service::repos::order_repo::OrderRepo;
use orders_service::services::identity::HttpTokenValidator;
use orders_service::state::AppState;
use serde_json::json;
use url::Url;

pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_secs(2);
pub const TEST_TIMEOUT: Duration = Duration::from_millis(300);

#[derive(Clone, Default)]
struct Recorder {
    hits: Arc<AtomicUsize>,
    last_authorization: Arc<Mutex<Option<String>>>,
}

pub struct FakeIdentityService {
    pub base_url: Url,
    recorder: Recorder,
}

impl FakeIdentityService {
    pub fn hits(&self) -> usize {
        self.recorder.hits.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.recorder.last_authorization.lock().unwrap().clone()
    }
}

async fn auth_me(State(recorder): State<Recorder>, headers: HeaderMap) -> Response {
    recorder.hits.fetch_add(1, Ordering::SeqCst);

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *recorder.last_authorization.lock().unwrap() = authorization.clone();

    let token = authorization
        .as_deref()
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    match token {
        "good" => Json(json!({
            "id": 1,
            "username": "waiter",
            "is_active": true,
            "permissions": ["orders:view"]
        }))
        .into_response(),
        "manager" => Json(json!({
            "id": 2,
            "username": "manager",
            "permissions": ["orders:view", "orders:manage"]
        }))
        .into_response(),
        "nobody" => Json(json!({"id": 3, "username": "guest", "permissions": []})).into_response(),
        "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
        "no-perms" => Json(json!({"id": 4, "username": "legacy"})).into_response(),
        "broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "maintenance" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "redirect" => {
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, "/elsewhere")]).into_response()
        }
        "slow" => {
            tokio::time::sleep(SLOW_RESPONSE_DELAY).await;
            Json(json!({"id": 1, "username": "waiter", "permissions": ["orders:view"]}))
                .into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Could not validate credentials"})),
        )
            .into_response(),
    }
}

async fn elsewhere(State(recorder): State<Recorder>) -> Response {
    recorder.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"id": 9, "username": "intruder", "permissions": ["orders:manage"]}))
        .into_response()
}

pub async fn spawn_identity_service() -> FakeIdentityService {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/api/v1/auth/me", get(auth_me))
        .route("/elsewhere", get(elsewhere))
        .with_state(recorder.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeIdentityService {
        base_url: Url::parse(&format!("http://{addr}")).unwrap(),
        recorder,
    }
}

/// Base URL of a loopback port nothing listens on.
pub async fn unreachable_base_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

pub fn validator(base_url: &Url) -> HttpTokenValidator {
    validator_with_timeout(base_url, TEST_TIMEOUT)
}

pub fn validator_with_timeout(base_url: &Url, timeout: Duration) -> HttpTokenValidator {
    let client = HttpTokenValidator::client_builder().build().unwrap();
    HttpTokenValidator::new(client, base_url, timeout).unwrap()
}

pub fn app_state(base_url: &Url) -> AppState {
    AppState::new(Arc::new(validator(base_url)), OrderRepo::new())
}
