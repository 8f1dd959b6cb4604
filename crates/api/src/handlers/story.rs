//! Handlers for the `/stories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use taskflow_core::error::CoreError;
use taskflow_db::entities::{self, set_fields, ScopedEntities};
use taskflow_db::models::project::Project;
use taskflow_db::models::story::{CreateStory, Story, UpdateStory};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// Optional filters for story listings.
#[derive(Debug, Default, Deserialize)]
pub struct StoryListQuery {
    pub project_id: Option<String>,
}

/// POST /api/stories
///
/// The referenced project must exist under the caller's scope; a foreign or
/// missing project id is rejected as 404 before anything is written.
pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(input): Json<CreateStory>,
) -> AppResult<(StatusCode, Json<Story>)> {
    let _: Project = ScopedEntities::get(
        &state.store,
        &identity.scope,
        &entities::PROJECT,
        &input.project_id,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Project", &input.project_id)))?;

    let story = Story::from_create(input, identity.scope.org_id().map(str::to_string));
    ScopedEntities::create(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::STORY,
        &story,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// GET /api/stories?project_id=
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<StoryListQuery>,
) -> AppResult<Json<Vec<Story>>> {
    let mut extra = serde_json::Map::new();
    if let Some(project_id) = query.project_id {
        extra.insert("project_id".into(), Value::String(project_id));
    }

    let stories =
        ScopedEntities::list(&state.store, &identity.scope, &entities::STORY, extra).await?;
    Ok(Json(stories))
}

/// GET /api/stories/{id}
pub async fn get_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Story>> {
    let story = ScopedEntities::get(&state.store, &identity.scope, &entities::STORY, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Story", &id)))?;
    Ok(Json(story))
}

/// PATCH /api/stories/{id}
pub async fn update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateStory>,
) -> AppResult<Json<Story>> {
    let fields = set_fields(&input)?;
    if fields.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    let story = ScopedEntities::update(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::STORY,
        &id,
        fields,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Story", &id)))?;
    Ok(Json(story))
}
