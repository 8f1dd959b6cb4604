//! Persistence error type.

/// Errors from the document store.
///
/// `Decode` covers a stored document that no longer matches its model shape;
/// both variants map to 500 at the HTTP boundary. Not-found is conveyed
/// through `Option`/`bool` returns, never through this type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid document: {0}")]
    Decode(#[from] serde_json::Error),
}
