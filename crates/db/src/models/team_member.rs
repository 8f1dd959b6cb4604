//! Team member entity model and DTOs.

use serde::{Deserialize, Serialize};
use taskflow_core::types::{new_entity_id, EntityId, Timestamp};

/// A team member. `role` and `department` are free-form display strings, not
/// platform roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: EntityId,
    pub organization_id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub avatar: String,
    pub created_at: Timestamp,
}

/// DTO for adding a team member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
    pub avatar: Option<String>,
}

impl TeamMember {
    pub fn from_create(input: CreateTeamMember, organization_id: Option<String>) -> Self {
        Self {
            id: new_entity_id(),
            organization_id,
            name: input.name,
            email: input.email,
            role: input.role,
            department: input.department.unwrap_or_default(),
            avatar: input.avatar.unwrap_or_default(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// DTO for PATCH on a team member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeamMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
