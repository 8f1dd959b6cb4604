//! Action history entity model and query parameters.
//!
//! Action history is an append-only ledger: entries are never updated or
//! deleted, and retrieval is always timestamp-descending.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskflow_core::action::Action;
use taskflow_core::types::{new_entity_id, EntityId, Timestamp};

/// One immutable audit record: who did what action, on which entity, when,
/// with what details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEntry {
    pub id: EntityId,
    pub organization_id: String,
    /// Actor display name, client-asserted.
    pub user: String,
    pub action: Action,
    pub entity_type: String,
    pub entity_id: String,
    /// Denormalized display-name snapshot, captured before deletion.
    pub entity_name: String,
    pub details: Value,
    pub timestamp: Timestamp,
}

impl ActionEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        organization_id: String,
        user: String,
        action: Action,
        entity_type: String,
        entity_id: String,
        entity_name: String,
        details: Value,
    ) -> Self {
        Self {
            id: new_entity_id(),
            organization_id,
            user,
            action,
            entity_type,
            entity_id,
            entity_name,
            details,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Query parameters for `GET /api/history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub limit: Option<i64>,
}
