//! Tenancy scope resolution.
//!
//! Every request carries an organization id (or the `"null"` sentinel) and is
//! resolved to a [`Scope`] before any store access. The scoped variant is
//! applied verbatim as a filter conjunct on every read and write; the unscoped
//! variant means platform-wide visibility and is intended only for the
//! super administrator.

use serde_json::{Map, Value};

/// The organization filter applied to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Platform-wide visibility (super-admin sentinel). Audit logging is a
    /// no-op under this scope.
    Unscoped,
    /// All reads and writes are confined to this organization id. The id is
    /// taken verbatim; no existence check is performed.
    Org(String),
}

/// Header value treated as the unscoped sentinel.
const NULL_SENTINEL: &str = "null";

impl Scope {
    /// Resolve a scope from the raw organization header value.
    ///
    /// Absent or `"null"` input resolves to [`Scope::Unscoped`]; anything else
    /// is carried verbatim. Never fails.
    pub fn resolve(header: Option<&str>) -> Scope {
        match header {
            None => Scope::Unscoped,
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed == NULL_SENTINEL {
                    Scope::Unscoped
                } else {
                    Scope::Org(trimmed.to_string())
                }
            }
        }
    }

    pub fn is_unscoped(&self) -> bool {
        matches!(self, Scope::Unscoped)
    }

    /// The concrete organization id, if any.
    pub fn org_id(&self) -> Option<&str> {
        match self {
            Scope::Unscoped => None,
            Scope::Org(id) => Some(id),
        }
    }

    /// Add the organization conjunct to an exact-match filter. Unscoped adds
    /// nothing, which is how platform-wide queries are expressed.
    pub fn apply_to(&self, filter: &mut Map<String, Value>) {
        if let Scope::Org(id) = self {
            filter.insert("organization_id".into(), Value::String(id.clone()));
        }
    }

    /// Build a filter containing only the organization conjunct.
    pub fn filter(&self) -> Map<String, Value> {
        let mut filter = Map::new();
        self.apply_to(&mut filter);
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_header_is_unscoped() {
        assert_eq!(Scope::resolve(None), Scope::Unscoped);
    }

    #[test]
    fn null_sentinel_is_unscoped() {
        assert_eq!(Scope::resolve(Some("null")), Scope::Unscoped);
        assert_eq!(Scope::resolve(Some("  null  ")), Scope::Unscoped);
        assert_eq!(Scope::resolve(Some("")), Scope::Unscoped);
    }

    #[test]
    fn org_id_carried_verbatim() {
        let scope = Scope::resolve(Some("org-123"));
        assert_eq!(scope, Scope::Org("org-123".into()));
        assert_eq!(scope.org_id(), Some("org-123"));
    }

    #[test]
    fn scoped_filter_carries_org_conjunct() {
        let filter = Scope::Org("acme".into()).filter();
        assert_eq!(filter.get("organization_id").unwrap(), "acme");
    }

    #[test]
    fn unscoped_filter_is_empty() {
        assert!(Scope::Unscoped.filter().is_empty());
    }
}
