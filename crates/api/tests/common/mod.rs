//! Shared helpers for API integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use taskflow_api::auth::token::TokenConfig;
use taskflow_api::config::{ServerConfig, SuperAdminSeed};
use taskflow_api::router::build_app_router;
use taskflow_api::state::AppState;
use taskflow_db::EntityStore;

/// Build a test `ServerConfig` with safe defaults and a fixed token secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        token: TokenConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 480,
        },
        super_admin: SuperAdminSeed {
            name: "Super Admin".to_string(),
            email: "root@test.com".to_string(),
            password: "root-password-123".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the construction in `main.rs` so integration
/// tests exercise the same stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        store: EntityStore::new(pool),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Identity headers attached to a request: `(X-Organization-Id, X-User-Name,
/// X-User-Role)` as applicable.
#[derive(Default, Clone)]
pub struct Caller {
    pub org: Option<&'static str>,
    pub name: Option<&'static str>,
    pub role: Option<&'static str>,
    pub bearer: Option<String>,
}

impl Caller {
    pub fn org(org: &'static str) -> Self {
        Self {
            org: Some(org),
            ..Default::default()
        }
    }

    pub fn named(org: &'static str, name: &'static str) -> Self {
        Self {
            org: Some(org),
            name: Some(name),
            ..Default::default()
        }
    }

    pub fn super_admin() -> Self {
        Self {
            name: Some("Root"),
            role: Some("SuperAdmin"),
            ..Default::default()
        }
    }

    pub fn bearer(token: String) -> Self {
        Self {
            bearer: Some(token),
            ..Default::default()
        }
    }
}

/// Dispatch one request through the router.
pub async fn request(
    app: Router,
    method: &str,
    uri: &str,
    caller: &Caller,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(org) = caller.org {
        builder = builder.header("x-organization-id", org);
    }
    if let Some(name) = caller.name {
        builder = builder.header("x-user-name", name);
    }
    if let Some(role) = caller.role {
        builder = builder.header("x-user-role", role);
    }
    if let Some(token) = &caller.bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, caller: &Caller) -> Response<Body> {
    request(app, "GET", uri, caller, None).await
}

pub async fn post_json(app: Router, uri: &str, caller: &Caller, body: Value) -> Response<Body> {
    request(app, "POST", uri, caller, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, caller: &Caller, body: Value) -> Response<Body> {
    request(app, "PATCH", uri, caller, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, caller: &Caller) -> Response<Body> {
    request(app, "DELETE", uri, caller, None).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
