//! Handlers for the `/organizations` resource.
//!
//! Organizations are platform-level entities: they carry no organization id
//! of their own, so reads and writes here run unscoped and role checks, not
//! the tenancy filter, gate access.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskflow_core::error::CoreError;
use taskflow_core::roles::Role;
use taskflow_core::scope::Scope;
use taskflow_db::collections;
use taskflow_db::entities::{self, set_fields, ScopedEntities};
use taskflow_db::models::organization::{Organization, UpdateOrganization};
use taskflow_db::models::user::User;
use taskflow_db::store::filter_of;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireOrgAdmin, RequireSuperAdmin};
use crate::state::AppState;

/// Length of the generated initial admin password.
const ADMIN_PASSWORD_LENGTH: usize = 12;

/// Request body for `POST /api/organizations`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub subdomain: String,
    pub admin_name: String,
    #[validate(email)]
    pub admin_email: String,
    pub logo: Option<String>,
    pub theme: Option<BTreeMap<String, String>>,
}

/// One-time credentials for the organization's initial admin.
#[derive(Debug, Serialize)]
pub struct AdminCredentials {
    pub email: String,
    /// Plaintext password, returned exactly once. Only the hash is stored.
    pub password: String,
}

/// Response body for `POST /api/organizations`.
#[derive(Debug, Serialize)]
pub struct CreateOrganizationResponse {
    pub organization: Organization,
    pub admin_credentials: AdminCredentials,
}

/// POST /api/organizations
///
/// Both uniqueness checks run before either insert so a rejected request
/// leaves no partial state behind.
pub async fn create(
    RequireSuperAdmin(identity): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateOrganizationRequest>,
) -> AppResult<(StatusCode, Json<CreateOrganizationResponse>)> {
    input.validate()?;

    let subdomain_taken = state
        .store
        .find_one(
            collections::ORGANIZATIONS,
            &filter_of([("subdomain", Value::String(input.subdomain.clone()))]),
        )
        .await?;
    if subdomain_taken.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Subdomain already in use".into(),
        )));
    }

    let email_taken = state
        .store
        .find_one(
            collections::USERS,
            &filter_of([("email", Value::String(input.admin_email.clone()))]),
        )
        .await?;
    if email_taken.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    let organization = Organization::new(input.name, input.subdomain, input.logo, input.theme);
    ScopedEntities::create(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::ORGANIZATION,
        &organization,
    )
    .await?;

    let password: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ADMIN_PASSWORD_LENGTH)
        .map(char::from)
        .collect();
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;

    let admin = User::new(
        input.admin_name,
        input.admin_email.clone(),
        password_hash,
        Role::Admin,
        Some(organization.id.clone()),
    );
    ScopedEntities::create(
        &state.store,
        &Scope::Org(organization.id.clone()),
        &identity.actor,
        &entities::USER,
        &admin,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrganizationResponse {
            organization,
            admin_credentials: AdminCredentials {
                email: input.admin_email,
                password,
            },
        }),
    ))
}

/// GET /api/organizations
pub async fn list(
    RequireSuperAdmin(_identity): RequireSuperAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Organization>>> {
    let organizations = ScopedEntities::list(
        &state.store,
        &Scope::Unscoped,
        &entities::ORGANIZATION,
        serde_json::Map::new(),
    )
    .await?;
    Ok(Json(organizations))
}

/// GET /api/organizations/{id}
///
/// Lookup is by id, not by scope: a member resolving their own organization
/// is the expected caller.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Organization>> {
    let organization =
        ScopedEntities::get(&state.store, &Scope::Unscoped, &entities::ORGANIZATION, &id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Organization", &id)))?;
    Ok(Json(organization))
}

/// PATCH /api/organizations/{id}
pub async fn update(
    RequireOrgAdmin(identity): RequireOrgAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateOrganization>,
) -> AppResult<Json<Organization>> {
    let fields = set_fields(&input)?;
    if fields.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    let organization = ScopedEntities::update(
        &state.store,
        &Scope::Unscoped,
        &identity.actor,
        &entities::ORGANIZATION,
        &id,
        fields,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Organization", &id)))?;
    Ok(Json(organization))
}
