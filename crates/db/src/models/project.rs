//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use taskflow_core::types::{new_entity_id, EntityId, Timestamp};

/// A project. Belongs to exactly one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub organization_id: Option<String>,
    pub name: String,
    pub description: String,
    /// Actor name from the request, unverified.
    pub created_by: String,
    pub created_at: Timestamp,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
}

impl Project {
    pub fn from_create(input: CreateProject, organization_id: Option<String>, actor: &str) -> Self {
        Self {
            id: new_entity_id(),
            organization_id,
            name: input.name,
            description: input.description,
            created_by: actor.to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// DTO for PATCH on a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
