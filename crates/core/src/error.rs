//! Domain-level error taxonomy shared by all crates.

/// Errors produced by domain logic and surfaced to API callers.
///
/// The HTTP layer maps each variant to a status code; see
/// `taskflow-api/src/error.rs`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist, or exists outside the caller's
    /// organization scope. The two cases are indistinguishable by design --
    /// a scoped filter simply never matches a foreign-tenant document.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Malformed or empty input.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation (email, subdomain).
    #[error("{0}")]
    Conflict(String),

    /// Credential mismatch on login.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller's role does not permit the operation.
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the common not-found construction.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
