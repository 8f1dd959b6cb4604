//! Story entity model and DTOs.

use serde::{Deserialize, Serialize};
use taskflow_core::types::{new_entity_id, EntityId, Priority, Timestamp};

/// A user story under a project in the same organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: EntityId,
    pub organization_id: Option<String>,
    pub project_id: String,
    pub title: String,
    pub description: String,
    /// Business requirements document text.
    #[serde(default)]
    pub brd: String,
    /// Product requirements document text.
    #[serde(default)]
    pub prd: String,
    pub priority: Priority,
    pub created_at: Timestamp,
}

/// DTO for creating a story.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStory {
    pub project_id: String,
    pub title: String,
    pub description: String,
    pub brd: Option<String>,
    pub prd: Option<String>,
    pub priority: Option<Priority>,
}

impl Story {
    pub fn from_create(input: CreateStory, organization_id: Option<String>) -> Self {
        Self {
            id: new_entity_id(),
            organization_id,
            project_id: input.project_id,
            title: input.title,
            description: input.description,
            brd: input.brd.unwrap_or_default(),
            prd: input.prd.unwrap_or_default(),
            priority: input.priority.unwrap_or(Priority::Medium),
            created_at: chrono::Utc::now(),
        }
    }
}

/// DTO for PATCH on a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}
