//! HTTP-level integration tests for registration, login, and token identity.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, patch_json, post_json, Caller};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn register(app: Router, email: &str, password: &str) -> Value {
    let body = json!({
        "name": "Alice",
        "email": email,
        "password": password,
        "role": "Developer",
    });
    let response = post_json(app, "/api/auth/register", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_sanitized_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let user = register(app, "alice@test.com", "hunter2hunter2").await;

    assert_eq!(user["email"], "alice@test.com");
    assert_eq!(user["role"], "Developer");
    assert_eq!(user["is_active"], true);
    assert!(
        user.get("password").is_none(),
        "password hash must never be serialized"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    register(app.clone(), "alice@test.com", "hunter2hunter2").await;

    let body = json!({
        "name": "Other Alice",
        "email": "alice@test.com",
        "password": "hunter2hunter2",
        "role": "Ops",
    });
    let response = post_json(app, "/api/auth/register", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Alice",
        "email": "alice@test.com",
        "password": "short",
        "role": "Developer",
    });
    let response = post_json(app, "/api/auth/register", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_returns_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "alice@test.com", "hunter2hunter2").await;

    let body = json!({ "email": "alice@test.com", "password": "hunter2hunter2" });
    let response = post_json(app, "/api/auth/login", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["token"].is_string(), "response must contain a token");
    assert_eq!(json["user"]["email"], "alice@test.com");
    assert!(json["organization"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "alice@test.com", "hunter2hunter2").await;

    let body = json!({ "email": "alice@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/auth/login", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "ghost@test.com", "password": "whatever1" });
    let response = post_json(app, "/api/auth/login", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_deactivated_account_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user = register(app.clone(), "alice@test.com", "hunter2hunter2").await;
    let id = user["id"].as_str().unwrap();

    let response = patch_json(
        app.clone(),
        &format!("/api/users/{id}"),
        &Caller::default(),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({ "email": "alice@test.com", "password": "hunter2hunter2" });
    let response = post_json(app, "/api/auth/login", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bearer_token_overrides_identity_headers(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Alice",
        "email": "alice@org-a.com",
        "password": "hunter2hunter2",
        "role": "Developer",
        "organization_id": "org-a",
    });
    let response = post_json(app.clone(), "/api/auth/register", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json!({ "email": "alice@org-a.com", "password": "hunter2hunter2" });
    let response = post_json(app.clone(), "/api/auth/login", &Caller::default(), body).await;
    let token = body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    // The token's org claim wins even with a conflicting header.
    let mut caller = Caller::bearer(token);
    caller.org = Some("org-b");
    let response = post_json(
        app.clone(),
        "/api/projects",
        &caller,
        json!({ "name": "Verified", "description": "token scoped" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let project = body_json(response).await;
    assert_eq!(project["organization_id"], "org-a");
    assert_eq!(project["created_by"], "Alice");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_bearer_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let caller = Caller::bearer("not-a-token".to_string());
    let response = get(app, "/api/projects", &caller).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
