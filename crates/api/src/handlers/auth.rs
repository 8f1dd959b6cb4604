//! Handlers for the `/auth` resource (login, register).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskflow_core::error::CoreError;
use taskflow_core::roles::Role;
use taskflow_db::collections;
use taskflow_db::models::organization::Organization;
use taskflow_db::models::user::{PublicUser, User};
use taskflow_db::store::filter_of;
use taskflow_db::StoreError;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::token::generate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
    /// The user's organization, when they belong to one.
    pub organization: Option<Organization>,
    /// Signed access token carrying the verified identity.
    pub token: String,
}

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role: Role,
    pub organization_id: Option<String>,
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same 401 so the endpoint does
/// not leak which emails exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    input.validate()?;

    let doc = state
        .store
        .find_one(
            collections::USERS,
            &filter_of([("email", Value::String(input.email.clone()))]),
        )
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;
    let user: User = serde_json::from_value(doc).map_err(StoreError::from)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let verified = verify_password(&input.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let organization = match &user.organization_id {
        Some(org_id) => state
            .store
            .find_one(
                collections::ORGANIZATIONS,
                &filter_of([("id", Value::String(org_id.clone()))]),
            )
            .await?
            .map(serde_json::from_value::<Organization>)
            .transpose()
            .map_err(StoreError::from)?,
        None => None,
    };

    let token = generate_token(
        &user.id,
        &user.name,
        user.role.as_str(),
        user.organization_id.as_deref(),
        &state.config.token,
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;

    Ok(Json(LoginResponse {
        user: user.into(),
        organization,
        token,
    }))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let existing = state
        .store
        .find_one(
            collections::USERS,
            &filter_of([("email", Value::String(input.email.clone()))]),
        )
        .await?;
    if existing.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?;
    let user = User::new(
        input.name,
        input.email,
        password_hash,
        input.role,
        input.organization_id,
    );

    state
        .store
        .insert(
            collections::USERS,
            &serde_json::to_value(&user).map_err(StoreError::from)?,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
