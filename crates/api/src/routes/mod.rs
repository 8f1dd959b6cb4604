pub mod auth;
pub mod dashboard;
pub mod department;
pub mod health;
pub mod history;
pub mod organization;
pub mod project;
pub mod story;
pub mod task;
pub mod team;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/register               register (public)
///
/// /organizations               list (SuperAdmin), create (SuperAdmin)
/// /organizations/{id}          get, update (SuperAdmin or Admin)
///
/// /users                       list, create
/// /users/{id}                  get, update
///
/// /projects                    list, create
/// /projects/{id}               get, update
///
/// /stories                     list (?project_id=), create
/// /stories/{id}                get, update
///
/// /tasks                       list (?project_id=&story_id=&status=&assigned_to=), create
/// /tasks/{id}                  get, update
/// /tasks/{id}/comments         add comment (POST)
///
/// /team                        list, create
/// /team/{id}                   get, update, delete
///
/// /departments                 list, create
/// /departments/{id}            get, update
///
/// /history                     audit trail (?entity_type=&entity_id=&limit=)
///
/// /dashboard/stats             totals and status/priority breakdowns
/// /dashboard/weekly            per-team weekly overview
/// /dashboard/performance       per-member performance report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/organizations", organization::router())
        .nest("/users", user::router())
        .nest("/projects", project::router())
        .nest("/stories", story::router())
        .nest("/tasks", task::router())
        .nest("/team", team::router())
        .nest("/departments", department::router())
        .nest("/history", history::router())
        .nest("/dashboard", dashboard::router())
}
