//! Route definitions for the `/organizations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::organization;
use crate::state::AppState;

/// Routes mounted at `/organizations`.
///
/// ```text
/// GET    /       -> list (SuperAdmin)
/// POST   /       -> create (SuperAdmin)
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update (SuperAdmin or Admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(organization::list).post(organization::create))
        .route(
            "/{id}",
            get(organization::get_by_id).patch(organization::update),
        )
}
