//! Handler for the `/history` resource (read-only audit trail).

use axum::extract::{Query, State};
use axum::Json;
use taskflow_db::audit::AuditTrail;
use taskflow_db::models::history::{ActionEntry, HistoryQuery};

use crate::error::AppResult;
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// GET /api/history?entity_type=&entity_id=&limit=
///
/// Entries come back newest first. An unscoped caller sees entries across
/// all organizations.
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<ActionEntry>>> {
    let entries = AuditTrail::query(&state.store, &identity.scope, &query).await?;
    Ok(Json(entries))
}
