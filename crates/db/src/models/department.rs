//! Department entity model and DTOs.

use serde::{Deserialize, Serialize};
use taskflow_core::types::{new_entity_id, EntityId, Timestamp};

/// Default department color swatch.
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// An organizational department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    pub organization_id: Option<String>,
    pub name: String,
    pub description: String,
    pub color: String,
    pub created_at: Timestamp,
}

/// DTO for creating a department.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    pub description: String,
    pub color: Option<String>,
}

impl Department {
    pub fn from_create(input: CreateDepartment, organization_id: Option<String>) -> Self {
        Self {
            id: new_entity_id(),
            organization_id,
            name: input.name,
            description: input.description,
            color: input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            created_at: chrono::Utc::now(),
        }
    }
}

/// DTO for PATCH on a department.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDepartment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
