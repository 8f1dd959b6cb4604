//! JSONB document store over Postgres.
//!
//! All entities live in the single `documents` table; a collection name plus
//! an exact-match filter (a conjunction of field/value pairs, evaluated as
//! JSONB containment) addresses every operation. The store is a plain handle
//! around a connection pool -- construct it once at startup and pass it into
//! whatever needs persistence; there is no global connection state.

use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::error::StoreError;

/// Descending/ascending sort on a top-level RFC3339 timestamp field.
///
/// Field names come from code constants, never from request input; they are
/// interpolated into the query text directly.
#[derive(Debug, Clone, Copy)]
pub struct Sort {
    pub field: &'static str,
    pub descending: bool,
}

/// Dependency-injected handle to the document store. Cheap to clone.
#[derive(Clone)]
pub struct EntityStore {
    pool: PgPool,
}

impl EntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a document. The document must carry its own `"id"` field.
    pub async fn insert(&self, collection: &str, doc: &Value) -> Result<(), StoreError> {
        let id = doc
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Decode(serde::de::Error::custom("document has no id")))?;

        sqlx::query("INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Find the first document matching the filter.
    pub async fn find_one(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let doc = sqlx::query_scalar::<_, Value>(
            "SELECT doc FROM documents WHERE collection = $1 AND doc @> $2 LIMIT 1",
        )
        .bind(collection)
        .bind(Value::Object(filter.clone()))
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    /// Find up to `limit` documents matching the filter.
    ///
    /// Without an explicit sort, results come back in insertion order.
    pub async fn find_many(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
        limit: i64,
        sort: Option<Sort>,
    ) -> Result<Vec<Value>, StoreError> {
        // Sort fields hold RFC3339 strings; the cast sorts them as instants
        // regardless of subsecond precision.
        let order_by = match sort {
            Some(sort) => format!(
                "(doc->>'{}')::timestamptz {}",
                sort.field,
                if sort.descending { "DESC" } else { "ASC" }
            ),
            None => "inserted_at ASC".to_string(),
        };
        let query = format!(
            "SELECT doc FROM documents WHERE collection = $1 AND doc @> $2 \
             ORDER BY {order_by} LIMIT $3"
        );
        let docs = sqlx::query_scalar::<_, Value>(&query)
            .bind(collection)
            .bind(Value::Object(filter.clone()))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    /// Apply a shallow field merge to the single document matching the filter,
    /// returning the merged document. Atomic per document: the filter match
    /// and the merge happen in one statement, so a scoped filter that matches
    /// also proves tenancy for the returned state. `None` means no match.
    pub async fn update_fields(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
        fields: &Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let doc = sqlx::query_scalar::<_, Value>(
            "UPDATE documents SET doc = doc || $3 \
             WHERE collection = $1 AND doc @> $2 RETURNING doc",
        )
        .bind(collection)
        .bind(Value::Object(filter.clone()))
        .bind(Value::Object(fields.clone()))
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    /// Append `element` to the array field `field` of the matching document
    /// (creating the array if absent), merging `also_set` in the same
    /// statement. Existing elements are never replaced or reordered.
    pub async fn push_to_array(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
        field: &str,
        element: &Value,
        also_set: &Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let doc = sqlx::query_scalar::<_, Value>(
            "UPDATE documents SET doc = jsonb_set(doc || $5, ARRAY[$3::text], \
                 COALESCE(doc->$3, '[]'::jsonb) || $4) \
             WHERE collection = $1 AND doc @> $2 RETURNING doc",
        )
        .bind(collection)
        .bind(Value::Object(filter.clone()))
        .bind(field)
        .bind(element)
        .bind(Value::Object(also_set.clone()))
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    /// Delete all documents matching the filter, returning the deleted count.
    pub async fn delete(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND doc @> $2")
            .bind(collection)
            .bind(Value::Object(filter.clone()))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count documents matching the filter.
    pub async fn count(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
    ) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM documents WHERE collection = $1 AND doc @> $2",
        )
        .bind(collection)
        .bind(Value::Object(filter.clone()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// Build an exact-match filter from field/value pairs.
pub fn filter_of<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
