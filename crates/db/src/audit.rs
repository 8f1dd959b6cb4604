//! Append-only audit trail over the `action_history` collection.

use serde_json::{Map, Value};
use taskflow_core::action::Action;
use taskflow_core::scope::Scope;

use crate::collections;
use crate::error::StoreError;
use crate::models::history::{ActionEntry, HistoryQuery};
use crate::store::{EntityStore, Sort};

/// Default number of history entries returned when no limit is given.
const DEFAULT_LIMIT: i64 = 100;
/// Hard cap on a single history page.
const MAX_LIMIT: i64 = 500;

/// Records and queries audit entries.
pub struct AuditTrail;

impl AuditTrail {
    /// Append one immutable audit record.
    ///
    /// A no-op under [`Scope::Unscoped`]: platform-level actions are not
    /// audited. Callers sequence this strictly after the primary mutation and
    /// must not roll that mutation back if the append fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        store: &EntityStore,
        scope: &Scope,
        actor: &str,
        action: Action,
        entity_type: &str,
        entity_id: &str,
        entity_name: &str,
        details: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let Some(org_id) = scope.org_id() else {
            return Ok(());
        };

        let entry = ActionEntry::new(
            org_id.to_string(),
            actor.to_string(),
            action,
            entity_type.to_string(),
            entity_id.to_string(),
            entity_name.to_string(),
            Value::Object(details),
        );
        let doc = serde_json::to_value(&entry)?;
        store.insert(collections::ACTION_HISTORY, &doc).await
    }

    /// Best-effort wrapper around [`Self::record`]: a failed append is logged
    /// and swallowed, because the mutation it describes has already committed.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_best_effort(
        store: &EntityStore,
        scope: &Scope,
        actor: &str,
        action: Action,
        entity_type: &str,
        entity_id: &str,
        entity_name: &str,
        details: Map<String, Value>,
    ) {
        if let Err(err) = Self::record(
            store,
            scope,
            actor,
            action,
            entity_type,
            entity_id,
            entity_name,
            details,
        )
        .await
        {
            tracing::error!(
                error = %err,
                entity_type,
                entity_id,
                action = %action,
                "failed to append audit record"
            );
        }
    }

    /// Query audit entries, newest first. Timestamp, not insert order, is
    /// authoritative for display order.
    pub async fn query(
        store: &EntityStore,
        scope: &Scope,
        params: &HistoryQuery,
    ) -> Result<Vec<ActionEntry>, StoreError> {
        let mut filter = scope.filter();
        if let Some(entity_type) = &params.entity_type {
            filter.insert("entity_type".into(), Value::String(entity_type.clone()));
        }
        if let Some(entity_id) = &params.entity_id {
            filter.insert("entity_id".into(), Value::String(entity_id.clone()));
        }

        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let sort = Sort {
            field: "timestamp",
            descending: true,
        };

        let docs = store
            .find_many(collections::ACTION_HISTORY, &filter, limit, Some(sort))
            .await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }
}
