//! Shared scoped-CRUD engine.
//!
//! Every tenant-scoped entity follows the same protocol: apply the scope as a
//! filter conjunct on every read and write, prove tenancy through the write
//! itself (a scoped update that matches zero rows is a NotFound, which is how
//! cross-tenant access is rejected), classify the mutation, and append an
//! audit record after the primary write commits. The logic is factored here
//! once; per-entity behavior is described by an [`EntityKind`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use taskflow_core::action::{classify, Action};
use taskflow_core::scope::Scope;

use crate::audit::AuditTrail;
use crate::collections;
use crate::error::StoreError;
use crate::models::task::{Comment, Task};
use crate::store::EntityStore;

/// Default page size for list operations.
pub const LIST_LIMIT: i64 = 1000;

/// Per-entity behavior of the shared protocol.
#[derive(Debug, Clone, Copy)]
pub struct EntityKind {
    pub collection: &'static str,
    /// Label stored in audit records.
    pub entity_type: &'static str,
    /// Document field holding the display name snapshot.
    pub name_field: &'static str,
    /// Whether every mutation bumps `updated_at`.
    pub bump_updated_at: bool,
    /// Whether updates read prior state for status/assignment classification.
    pub prior_read: bool,
}

pub const ORGANIZATION: EntityKind = EntityKind {
    collection: collections::ORGANIZATIONS,
    entity_type: "organization",
    name_field: "name",
    bump_updated_at: false,
    prior_read: false,
};

pub const USER: EntityKind = EntityKind {
    collection: collections::USERS,
    entity_type: "user",
    name_field: "name",
    bump_updated_at: false,
    prior_read: false,
};

pub const PROJECT: EntityKind = EntityKind {
    collection: collections::PROJECTS,
    entity_type: "project",
    name_field: "name",
    bump_updated_at: false,
    prior_read: false,
};

pub const STORY: EntityKind = EntityKind {
    collection: collections::STORIES,
    entity_type: "story",
    name_field: "title",
    bump_updated_at: false,
    prior_read: false,
};

pub const TASK: EntityKind = EntityKind {
    collection: collections::TASKS,
    entity_type: "task",
    name_field: "title",
    bump_updated_at: true,
    prior_read: true,
};

pub const TEAM_MEMBER: EntityKind = EntityKind {
    collection: collections::TEAM_MEMBERS,
    entity_type: "team_member",
    name_field: "name",
    bump_updated_at: false,
    prior_read: false,
};

pub const DEPARTMENT: EntityKind = EntityKind {
    collection: collections::DEPARTMENTS,
    entity_type: "department",
    name_field: "name",
    bump_updated_at: false,
    prior_read: false,
};

/// Serialize an all-optional update DTO into the map of its set fields.
///
/// DTO fields are marked `skip_serializing_if = "Option::is_none"`, so unset
/// members disappear entirely; an empty result means the caller must reject
/// the update as invalid input before any store access.
pub fn set_fields<T: Serialize>(dto: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(dto)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn display_name(doc: &Value, kind: &EntityKind) -> String {
    doc.get(kind.name_field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn id_filter(scope: &Scope, id: &str) -> Map<String, Value> {
    let mut filter = scope.filter();
    filter.insert("id".into(), Value::String(id.to_string()));
    filter
}

/// The shared protocol, one static async fn per operation, in the style of a
/// repository: the store handle is always the first argument.
pub struct ScopedEntities;

impl ScopedEntities {
    /// Insert a freshly stamped entity and audit it as created.
    pub async fn create<T: Serialize>(
        store: &EntityStore,
        scope: &Scope,
        actor: &str,
        kind: &EntityKind,
        entity: &T,
    ) -> Result<(), StoreError> {
        let doc = serde_json::to_value(entity)?;
        store.insert(kind.collection, &doc).await?;

        let id = doc.get("id").and_then(Value::as_str).unwrap_or_default();
        AuditTrail::record_best_effort(
            store,
            scope,
            actor,
            Action::Created,
            kind.entity_type,
            id,
            &display_name(&doc, kind),
            Map::new(),
        )
        .await;
        Ok(())
    }

    /// Fetch one entity under the scope. `None` covers both a missing id and
    /// a foreign-tenant id.
    pub async fn get<T: DeserializeOwned>(
        store: &EntityStore,
        scope: &Scope,
        kind: &EntityKind,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let doc = store.find_one(kind.collection, &id_filter(scope, id)).await?;
        doc.map(|d| serde_json::from_value(d).map_err(StoreError::from))
            .transpose()
    }

    /// List entities under the scope, with optional extra exact-match
    /// conjuncts (e.g. task status filters).
    pub async fn list<T: DeserializeOwned>(
        store: &EntityStore,
        scope: &Scope,
        kind: &EntityKind,
        extra: Map<String, Value>,
    ) -> Result<Vec<T>, StoreError> {
        let mut filter = scope.filter();
        filter.extend(extra);
        let docs = store
            .find_many(kind.collection, &filter, LIST_LIMIT, None)
            .await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    /// Apply a non-empty partial update under the scope.
    ///
    /// The scoped `UPDATE ... RETURNING` both proves tenancy and yields the
    /// merged entity, so no re-read happens outside the scope filter. Returns
    /// `None` when nothing matched (missing or foreign-tenant id).
    pub async fn update<T: DeserializeOwned>(
        store: &EntityStore,
        scope: &Scope,
        actor: &str,
        kind: &EntityKind,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Option<T>, StoreError> {
        let filter = id_filter(scope, id);

        let prior = if kind.prior_read {
            store.find_one(kind.collection, &filter).await?
        } else {
            None
        };

        // The synthetic bump is a write concern only; audit details must
        // carry exactly the fields the caller changed.
        let mut write_fields = fields.clone();
        if kind.bump_updated_at {
            write_fields.insert(
                "updated_at".into(),
                serde_json::to_value(chrono::Utc::now())?,
            );
        }

        let Some(merged) = store
            .update_fields(kind.collection, &filter, &write_fields)
            .await?
        else {
            return Ok(None);
        };

        // Kinds without a prior read classify against the merged row: its
        // values already equal the payload, so the status rule cannot fire
        // and the mutation falls through to `updated`.
        let (action, details) = classify(prior.as_ref().or(Some(&merged)), &fields);
        AuditTrail::record_best_effort(
            store,
            scope,
            actor,
            action,
            kind.entity_type,
            id,
            &display_name(&merged, kind),
            details,
        )
        .await;

        serde_json::from_value(merged)
            .map(Some)
            .map_err(StoreError::from)
    }

    /// Delete one entity under the scope, auditing with the display name
    /// captured before the row disappears. Returns `false` when nothing
    /// matched.
    pub async fn delete(
        store: &EntityStore,
        scope: &Scope,
        actor: &str,
        kind: &EntityKind,
        id: &str,
    ) -> Result<bool, StoreError> {
        let filter = id_filter(scope, id);
        let Some(existing) = store.find_one(kind.collection, &filter).await? else {
            return Ok(false);
        };
        let name = display_name(&existing, kind);

        let deleted = store.delete(kind.collection, &filter).await?;
        if deleted == 0 {
            return Ok(false);
        }

        AuditTrail::record_best_effort(
            store,
            scope,
            actor,
            Action::Deleted,
            kind.entity_type,
            id,
            &name,
            Map::new(),
        )
        .await;
        Ok(true)
    }

    /// Append a comment to a task. Append-only: existing comments are never
    /// replaced or reordered. The comment author, not a header, is the actor
    /// for the audit record.
    pub async fn add_task_comment(
        store: &EntityStore,
        scope: &Scope,
        task_id: &str,
        comment: &Comment,
    ) -> Result<Option<Task>, StoreError> {
        let filter = id_filter(scope, task_id);
        let element = serde_json::to_value(comment)?;

        let mut bump = Map::new();
        bump.insert(
            "updated_at".into(),
            serde_json::to_value(chrono::Utc::now())?,
        );

        let Some(merged) = store
            .push_to_array(TASK.collection, &filter, "comments", &element, &bump)
            .await?
        else {
            return Ok(None);
        };

        let mut details = Map::new();
        details.insert("text".into(), Value::String(comment.text.clone()));
        AuditTrail::record_best_effort(
            store,
            scope,
            &comment.user,
            Action::Commented,
            TASK.entity_type,
            task_id,
            &display_name(&merged, &TASK),
            details,
        )
        .await;

        serde_json::from_value(merged)
            .map(Some)
            .map_err(StoreError::from)
    }
}
