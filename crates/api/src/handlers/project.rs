//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskflow_core::error::CoreError;
use taskflow_db::entities::{self, set_fields, ScopedEntities};
use taskflow_db::models::project::{CreateProject, Project, UpdateProject};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = Project::from_create(
        input,
        identity.scope.org_id().map(str::to_string),
        &identity.actor,
    );
    ScopedEntities::create(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::PROJECT,
        &project,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ScopedEntities::list(
        &state.store,
        &identity.scope,
        &entities::PROJECT,
        serde_json::Map::new(),
    )
    .await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let project = ScopedEntities::get(&state.store, &identity.scope, &entities::PROJECT, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Project", &id)))?;
    Ok(Json(project))
}

/// PATCH /api/projects/{id}
pub async fn update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let fields = set_fields(&input)?;
    if fields.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    let project = ScopedEntities::update(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::PROJECT,
        &id,
        fields,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Project", &id)))?;
    Ok(Json(project))
}
