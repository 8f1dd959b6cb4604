//! Integration tests for organization provisioning and role gating.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, patch_json, post_json, Caller};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_org(app: Router, name: &str, subdomain: &str, admin_email: &str) -> Value {
    let body = json!({
        "name": name,
        "subdomain": subdomain,
        "admin_name": "Org Admin",
        "admin_email": admin_email,
    });
    let response = post_json(app, "/api/organizations", &Caller::super_admin(), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_super_admin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Acme",
        "subdomain": "acme",
        "admin_name": "Org Admin",
        "admin_email": "admin@acme.com",
    });

    // No role header at all.
    let response = post_json(app.clone(), "/api/organizations", &Caller::default(), body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An org admin is not enough.
    let mut caller = Caller::default();
    caller.role = Some("Admin");
    let response = post_json(app, "/api/organizations", &caller, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_one_time_admin_credentials(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = create_org(app.clone(), "Acme", "acme", "admin@acme.com").await;

    assert_eq!(created["organization"]["name"], "Acme");
    assert_eq!(created["organization"]["subdomain"], "acme");
    assert_eq!(created["organization"]["is_active"], true);
    assert_eq!(created["admin_credentials"]["email"], "admin@acme.com");

    let password = created["admin_credentials"]["password"].as_str().unwrap();
    assert_eq!(password.len(), 12);

    // The generated credentials actually work, and the login resolves the
    // admin's organization.
    let body = json!({ "email": "admin@acme.com", "password": password });
    let response = post_json(app, "/api/auth/login", &Caller::default(), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let login = body_json(response).await;
    assert_eq!(login["user"]["role"], "Admin");
    assert_eq!(login["organization"]["id"], created["organization"]["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_subdomain_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_org(app.clone(), "Acme", "acme", "admin@acme.com").await;

    let body = json!({
        "name": "Acme Clone",
        "subdomain": "acme",
        "admin_name": "Someone",
        "admin_email": "other@acme.com",
    });
    let response = post_json(app, "/api/organizations", &Caller::super_admin(), body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_admin_email_conflicts_before_insert(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_org(app.clone(), "Acme", "acme", "admin@acme.com").await;

    let body = json!({
        "name": "Beta",
        "subdomain": "beta",
        "admin_name": "Someone",
        "admin_email": "admin@acme.com",
    });
    let response = post_json(app.clone(), "/api/organizations", &Caller::super_admin(), body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The rejected request must not have left a half-created organization.
    let response = get(app, "/api/organizations", &Caller::super_admin()).await;
    let orgs = body_json(response).await;
    assert_eq!(orgs.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_requires_super_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_org(app.clone(), "Acme", "acme", "admin@acme.com").await;

    let response = get(app.clone(), "/api/organizations", &Caller::default()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(app, "/api/organizations", &Caller::super_admin()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let orgs = body_json(response).await;
    assert_eq!(orgs.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_by_id_needs_no_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_org(app.clone(), "Acme", "acme", "admin@acme.com").await;
    let id = created["organization"]["id"].as_str().unwrap();

    let response = get(app.clone(), &format!("/api/organizations/{id}"), &Caller::default()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let org = body_json(response).await;
    assert_eq!(org["name"], "Acme");

    let response = get(app, "/api/organizations/nope", &Caller::default()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_requires_admin_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_org(app.clone(), "Acme", "acme", "admin@acme.com").await;
    let id = created["organization"]["id"].as_str().unwrap();
    let uri = format!("/api/organizations/{id}");

    let response = patch_json(
        app.clone(),
        &uri,
        &Caller::default(),
        json!({ "name": "Acme Corp" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let mut admin = Caller::default();
    admin.role = Some("Admin");
    admin.name = Some("Org Admin");

    // An empty patch is rejected before touching the store.
    let response = patch_json(app.clone(), &uri, &admin, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(app, &uri, &admin, json!({ "name": "Acme Corp" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let org = body_json(response).await;
    assert_eq!(org["name"], "Acme Corp");
    assert_eq!(org["subdomain"], "acme");
}
