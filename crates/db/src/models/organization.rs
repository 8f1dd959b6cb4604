//! Organization entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskflow_core::types::{new_entity_id, EntityId, Timestamp};

/// An organization -- the unit of tenancy. `subdomain` is globally unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: EntityId,
    pub name: String,
    pub subdomain: String,
    #[serde(default)]
    pub logo: String,
    /// Named color slots for the tenant's UI theme.
    #[serde(default)]
    pub theme: BTreeMap<String, String>,
    /// Opaque per-tenant settings.
    #[serde(default)]
    pub settings: Value,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Organization {
    pub fn new(
        name: String,
        subdomain: String,
        logo: Option<String>,
        theme: Option<BTreeMap<String, String>>,
    ) -> Self {
        Self {
            id: new_entity_id(),
            name,
            subdomain,
            logo: logo.unwrap_or_default(),
            theme: theme.unwrap_or_default(),
            settings: Value::Object(Default::default()),
            is_active: true,
            created_at: chrono::Utc::now(),
        }
    }
}

/// DTO for PATCH on an organization. All fields optional; unset fields are
/// omitted from the update payload entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
