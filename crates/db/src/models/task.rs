//! Task entity model and DTOs.
//!
//! Tasks are the only entity that participates in status/assignment auditing,
//! so updates read prior state and every mutation bumps `updated_at`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use taskflow_core::types::{new_entity_id, EntityId, Priority, TaskStatus, TaskType, Timestamp};

/// A comment on a task. Comments are append-only: the list is never replaced
/// or reordered after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub user: String,
    pub text: String,
    pub created_at: Timestamp,
}

impl Comment {
    pub fn new(user: String, text: String) -> Self {
        Self {
            id: new_entity_id(),
            user,
            text,
            created_at: chrono::Utc::now(),
        }
    }
}

/// A task under a project, optionally linked to a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub organization_id: Option<String>,
    pub project_id: String,
    pub story_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Member display name, not a foreign key.
    pub assigned_to: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_date: Option<String>,
    pub story_points: Option<u32>,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub team: String,
    #[serde(default)]
    pub linked_tasks: BTreeSet<String>,
    pub created_at: Timestamp,
    /// Bumped on every mutation, including comment appends.
    pub updated_at: Timestamp,
}

/// DTO for creating a task. Omitted optionals take the platform defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: String,
    pub story_id: Option<String>,
    pub title: String,
    pub description: String,
    pub assigned_to: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_date: Option<String>,
    pub story_points: Option<u32>,
    pub priority: Option<Priority>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    pub team: Option<String>,
}

/// Default team for tasks that do not name one.
pub const DEFAULT_TEAM: &str = "Development";

impl Task {
    pub fn from_create(input: CreateTask, organization_id: Option<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: new_entity_id(),
            organization_id,
            project_id: input.project_id,
            story_id: input.story_id,
            title: input.title,
            description: input.description,
            attachments: Vec::new(),
            comments: Vec::new(),
            assigned_to: input.assigned_to,
            start_date: input.start_date,
            end_date: input.end_date,
            target_date: input.target_date,
            story_points: input.story_points,
            priority: input.priority.unwrap_or(Priority::Medium),
            task_type: input.task_type.unwrap_or(TaskType::Task),
            status: TaskStatus::Todo,
            team: input.team.unwrap_or_else(|| DEFAULT_TEAM.to_string()),
            linked_tasks: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for PATCH on a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_tasks: Option<BTreeSet<String>>,
}

/// Optional filters for task listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    pub project_id: Option<String>,
    pub story_id: Option<String>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
}
