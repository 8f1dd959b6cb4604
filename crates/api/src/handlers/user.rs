//! Handlers for the `/users` resource. Responses only ever carry
//! [`PublicUser`]; the stored password hash never leaves the db layer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use taskflow_core::error::CoreError;
use taskflow_core::roles::Role;
use taskflow_db::collections;
use taskflow_db::entities::{self, set_fields, ScopedEntities};
use taskflow_db::models::user::{PublicUser, UpdateUser, User};
use taskflow_db::store::filter_of;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// Minimum password length accepted at user creation.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role: Role,
    pub avatar: Option<String>,
}

/// POST /api/users
pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Email is unique across the whole platform, not per organization.
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
    let mut user = User::new(
        input.name,
        input.email,
        password_hash,
        input.role,
        identity.scope.org_id().map(str::to_string),
    );
    if let Some(avatar) = input.avatar {
        user.avatar = avatar;
    }

    ScopedEntities::create(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::USER,
        &user,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PublicUser>>> {
    let users: Vec<User> = ScopedEntities::list(
        &state.store,
        &identity.scope,
        &entities::USER,
        serde_json::Map::new(),
    )
    .await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PublicUser>> {
    let user: User = ScopedEntities::get(&state.store, &identity.scope, &entities::USER, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", &id)))?;
    Ok(Json(user.into()))
}

/// PATCH /api/users/{id}
pub async fn update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<PublicUser>> {
    let fields = set_fields(&input)?;
    if fields.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    let user: User = ScopedEntities::update(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::USER,
        &id,
        fields,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("User", &id)))?;
    Ok(Json(user.into()))
}
