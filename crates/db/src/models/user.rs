//! User entity model and DTOs.
//!
//! The stored document carries the password hash; [`PublicUser`] is the only
//! shape ever serialized into an API response.

use serde::{Deserialize, Serialize};
use taskflow_core::roles::Role;
use taskflow_core::types::{new_entity_id, EntityId, Timestamp};

/// A platform user. `email` is globally unique; `organization_id` is None for
/// platform-level users (the bootstrap SuperAdmin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    /// Argon2id PHC hash. Never exposed: responses use [`PublicUser`].
    pub password: String,
    pub role: Role,
    pub organization_id: Option<String>,
    #[serde(default)]
    pub avatar: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        role: Role,
        organization_id: Option<String>,
    ) -> Self {
        Self {
            id: new_entity_id(),
            name,
            email,
            password: password_hash,
            role,
            organization_id,
            avatar: String::new(),
            is_active: true,
            created_at: chrono::Utc::now(),
        }
    }
}

/// User shape returned by the API -- everything except the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub organization_id: Option<String>,
    pub avatar: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            organization_id: user.organization_id,
            avatar: user.avatar,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// DTO for PATCH on a user. Password changes are not part of this surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
