//! Integration tests for organization scoping across the CRUD surface.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, patch_json, post_json, Caller};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_project(app: Router, caller: &Caller, name: &str) -> Value {
    let body = json!({ "name": name, "description": "a project" });
    let response = post_json(app, "/api/projects", caller, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scoped_create_stamps_org_and_actor(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project = create_project(app, &Caller::named("org-a", "Alice"), "Apollo").await;

    assert_eq!(project["organization_id"], "org-a");
    assert_eq!(project["created_by"], "Alice");
    assert!(project["id"].is_string());
    assert!(project["created_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn actor_defaults_to_system(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project = create_project(app, &Caller::org("org-a"), "Apollo").await;
    assert_eq!(project["created_by"], "System");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn foreign_org_cannot_see_or_touch(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project = create_project(app.clone(), &Caller::org("org-a"), "Apollo").await;
    let id = project["id"].as_str().unwrap();
    let uri = format!("/api/projects/{id}");

    // Visible to its own org.
    let response = get(app.clone(), &uri, &Caller::org("org-a")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Invisible to another org: both read and write report 404.
    let response = get(app.clone(), &uri, &Caller::org("org-b")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json(
        app.clone(),
        &uri,
        &Caller::org("org-b"),
        json!({ "name": "Hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // And the document is untouched.
    let response = get(app, &uri, &Caller::org("org-a")).await;
    let project = body_json(response).await;
    assert_eq!(project["name"], "Apollo");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listings_are_partitioned_by_org(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_project(app.clone(), &Caller::org("org-a"), "Apollo").await;
    create_project(app.clone(), &Caller::org("org-b"), "Borealis").await;

    let response = get(app.clone(), "/api/projects", &Caller::org("org-a")).await;
    let projects = body_json(response).await;
    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(projects[0]["name"], "Apollo");

    let response = get(app, "/api/projects", &Caller::org("org-b")).await;
    let projects = body_json(response).await;
    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(projects[0]["name"], "Borealis");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unscoped_and_null_sentinel_see_everything(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_project(app.clone(), &Caller::org("org-a"), "Apollo").await;
    create_project(app.clone(), &Caller::org("org-b"), "Borealis").await;

    // Absent header.
    let response = get(app.clone(), "/api/projects", &Caller::default()).await;
    let projects = body_json(response).await;
    assert_eq!(projects.as_array().unwrap().len(), 2);

    // Literal "null" header resolves to the same unscoped view.
    let response = get(app, "/api/projects", &Caller::org("null")).await;
    let projects = body_json(response).await;
    assert_eq!(projects.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn users_are_scoped_and_sanitized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Bob",
        "email": "bob@org-a.com",
        "password": "hunter2hunter2",
        "role": "Developer",
    });
    let response = post_json(app.clone(), "/api/users", &Caller::org("org-a"), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["organization_id"], "org-a");
    assert!(user.get("password").is_none());

    let response = get(app.clone(), "/api/users", &Caller::org("org-b")).await;
    let users = body_json(response).await;
    assert!(users.as_array().unwrap().is_empty());

    let response = get(app, "/api/users", &Caller::org("org-a")).await;
    let users = body_json(response).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert!(users[0].get("password").is_none());
}
