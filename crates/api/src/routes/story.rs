//! Route definitions for the `/stories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::story;
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// GET    /       -> list (?project_id=)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story::list).post(story::create))
        .route("/{id}", get(story::get_by_id).patch(story::update))
}
