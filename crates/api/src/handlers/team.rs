//! Handlers for the `/team` resource. The only entity with a DELETE surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskflow_core::error::CoreError;
use taskflow_db::entities::{self, set_fields, ScopedEntities};
use taskflow_db::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// POST /api/team
pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<(StatusCode, Json<TeamMember>)> {
    let member = TeamMember::from_create(input, identity.scope.org_id().map(str::to_string));
    ScopedEntities::create(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::TEAM_MEMBER,
        &member,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /api/team
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TeamMember>>> {
    let members = ScopedEntities::list(
        &state.store,
        &identity.scope,
        &entities::TEAM_MEMBER,
        serde_json::Map::new(),
    )
    .await?;
    Ok(Json(members))
}

/// GET /api/team/{id}
pub async fn get_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TeamMember>> {
    let member = ScopedEntities::get(&state.store, &identity.scope, &entities::TEAM_MEMBER, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Team member", &id)))?;
    Ok(Json(member))
}

/// PATCH /api/team/{id}
pub async fn update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTeamMember>,
) -> AppResult<Json<TeamMember>> {
    let fields = set_fields(&input)?;
    if fields.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    let member = ScopedEntities::update(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::TEAM_MEMBER,
        &id,
        fields,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Team member", &id)))?;
    Ok(Json(member))
}

/// DELETE /api/team/{id}
pub async fn delete(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = ScopedEntities::delete(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::TEAM_MEMBER,
        &id,
    )
    .await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Team member", &id)))
    }
}
