//! Handlers for the `/departments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskflow_core::error::CoreError;
use taskflow_db::entities::{self, set_fields, ScopedEntities};
use taskflow_db::models::department::{CreateDepartment, Department, UpdateDepartment};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// POST /api/departments
pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    let department = Department::from_create(input, identity.scope.org_id().map(str::to_string));
    ScopedEntities::create(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::DEPARTMENT,
        &department,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/departments
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Department>>> {
    let departments = ScopedEntities::list(
        &state.store,
        &identity.scope,
        &entities::DEPARTMENT,
        serde_json::Map::new(),
    )
    .await?;
    Ok(Json(departments))
}

/// GET /api/departments/{id}
pub async fn get_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Department>> {
    let department =
        ScopedEntities::get(&state.store, &identity.scope, &entities::DEPARTMENT, &id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found("Department", &id)))?;
    Ok(Json(department))
}

/// PATCH /api/departments/{id}
pub async fn update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    let fields = set_fields(&input)?;
    if fields.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    let department = ScopedEntities::update(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::DEPARTMENT,
        &id,
        fields,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Department", &id)))?;
    Ok(Json(department))
}
