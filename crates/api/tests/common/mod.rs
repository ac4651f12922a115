#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use strategist_api::config::ServerConfig;
use strategist_api::router::build_app_router;
use strategist_api::state::AppState;
use strategist_core::contact::ContactMessage;
use strategist_mailer::{ContactSender, MailError};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        json_logs: false,
    }
}

/// Build the full application router (same middleware stack as production)
/// with no contact relay configured.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, None)
}

/// Build the application with the given contact sender.
pub fn build_test_app_with_sender(pool: PgPool, sender: Arc<dyn ContactSender>) -> Router {
    build_app(pool, Some(sender))
}

fn build_app(pool: PgPool, contact_sender: Option<Arc<dyn ContactSender>>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        contact_sender,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Contact sender doubles
// ---------------------------------------------------------------------------

/// Records every message instead of sending it.
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl ContactSender for RecordingSender {
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingSender;

#[async_trait]
impl ContactSender for FailingSender {
    async fn send_contact(&self, _message: &ContactMessage) -> Result<(), MailError> {
        Err(MailError::Build("smtp down".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header(response: &Response<Body>, name: &str) -> String {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
        .to_string()
}
