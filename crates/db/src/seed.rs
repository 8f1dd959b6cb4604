//! First-run seeding.

use serde_json::Value;
use taskflow_core::roles::Role;

use crate::collections;
use crate::error::StoreError;
use crate::models::user::User;
use crate::store::{filter_of, EntityStore};

/// Create the bootstrap SuperAdmin (organization_id = None) unless one
/// already exists. Exactly one platform SuperAdmin is expected; repeated
/// startups are no-ops. The caller supplies an already-hashed password.
///
/// Returns `true` if a user was created.
pub async fn seed_super_admin(
    store: &EntityStore,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<bool, StoreError> {
    let existing = store
        .find_one(
            collections::USERS,
            &filter_of([("role", Value::String(Role::SuperAdmin.as_str().into()))]),
        )
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let admin = User::new(
        name.to_string(),
        email.to_string(),
        password_hash.to_string(),
        Role::SuperAdmin,
        None,
    );
    store
        .insert(collections::USERS, &serde_json::to_value(&admin)?)
        .await?;
    tracing::info!(email, "seeded bootstrap SuperAdmin");
    Ok(true)
}
