//! Handlers for the `/tasks` resource, including comment appends.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use taskflow_core::error::CoreError;
use taskflow_db::entities::{self, set_fields, ScopedEntities};
use taskflow_db::models::project::Project;
use taskflow_db::models::story::Story;
use taskflow_db::models::task::{Comment, CreateTask, Task, TaskListQuery, UpdateTask};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// Request body for `POST /api/tasks/{id}/comments`.
///
/// `user` names the comment author and takes precedence over the resolved
/// actor. A redundant `task_id` in the body is ignored; the path names the
/// task.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub user: Option<String>,
    pub text: String,
}

/// POST /api/tasks
///
/// The referenced project (and story, when given) must exist under the
/// caller's scope; dangling references are rejected as 404 before anything
/// is written.
pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let _: Project = ScopedEntities::get(
        &state.store,
        &identity.scope,
        &entities::PROJECT,
        &input.project_id,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Project", &input.project_id)))?;

    if let Some(story_id) = &input.story_id {
        let _: Story =
            ScopedEntities::get(&state.store, &identity.scope, &entities::STORY, story_id)
                .await?
                .ok_or_else(|| AppError::Core(CoreError::not_found("Story", story_id)))?;
    }

    let task = Task::from_create(input, identity.scope.org_id().map(str::to_string));
    ScopedEntities::create(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::TASK,
        &task,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks?project_id=&story_id=&status=&assigned_to=
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let mut extra = serde_json::Map::new();
    if let Some(project_id) = query.project_id {
        extra.insert("project_id".into(), Value::String(project_id));
    }
    if let Some(story_id) = query.story_id {
        extra.insert("story_id".into(), Value::String(story_id));
    }
    if let Some(status) = query.status {
        extra.insert("status".into(), Value::String(status.as_str().to_string()));
    }
    if let Some(assigned_to) = query.assigned_to {
        extra.insert("assigned_to".into(), Value::String(assigned_to));
    }

    let tasks = ScopedEntities::list(&state.store, &identity.scope, &entities::TASK, extra).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let task = ScopedEntities::get(&state.store, &identity.scope, &entities::TASK, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Task", &id)))?;
    Ok(Json(task))
}

/// PATCH /api/tasks/{id}
pub async fn update(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    let fields = set_fields(&input)?;
    if fields.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    let task = ScopedEntities::update(
        &state.store,
        &identity.scope,
        &identity.actor,
        &entities::TASK,
        &id,
        fields,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Task", &id)))?;
    Ok(Json(task))
}

/// POST /api/tasks/{id}/comments
///
/// The comment author is the body's `user` when supplied, otherwise the
/// resolved actor. The author, not a header, becomes the audit actor for the
/// resulting `commented` entry.
pub async fn add_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    if input.text.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment text must not be empty".into(),
        )));
    }

    let author = input
        .user
        .map(|user| user.trim().to_string())
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| identity.actor.clone());
    let comment = Comment::new(author, input.text);
    let task = ScopedEntities::add_task_comment(&state.store, &identity.scope, &id, &comment)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Task", &id)))?;
    Ok((StatusCode::CREATED, Json(task)))
}
