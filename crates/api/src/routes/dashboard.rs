//! Route definitions for the `/dashboard` aggregates.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /stats        -> totals and status/priority breakdowns
/// GET /weekly       -> per-team weekly overview
/// GET /performance  -> per-member performance report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/weekly", get(dashboard::weekly))
        .route("/performance", get(dashboard::performance))
}
