//! Handlers for the `/dashboard` aggregates.
//!
//! All three views are computed from the scoped task/member listings; nothing
//! here can observe another tenant's rows.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use taskflow_core::types::{Priority, TaskStatus};
use taskflow_db::collections;
use taskflow_db::entities::{self, ScopedEntities};
use taskflow_db::models::task::Task;
use taskflow_db::models::team_member::TeamMember;

use crate::error::AppResult;
use crate::middleware::identity::Identity;
use crate::state::AppState;

/// Label used for tasks with no assignee in the weekly view.
const UNASSIGNED: &str = "Unassigned";

/// Task counts grouped by status.
#[derive(Debug, Default, Serialize)]
pub struct TaskBreakdown {
    pub todo: i64,
    pub in_progress: i64,
    pub in_review: i64,
    pub done: i64,
    pub blocked: i64,
}

/// Counts of high-urgency tasks.
#[derive(Debug, Default, Serialize)]
pub struct PriorityBreakdown {
    pub high: i64,
    pub critical: i64,
}

/// Response body for `GET /api/dashboard/stats`.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub total_stories: i64,
    pub total_tasks: i64,
    pub total_members: i64,
    pub task_breakdown: TaskBreakdown,
    pub priority_breakdown: PriorityBreakdown,
}

/// Flattened task row in the weekly view.
#[derive(Debug, Serialize)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub assigned_to: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub target_date: Option<String>,
    pub priority: Priority,
}

/// Per-team slice of the weekly view.
#[derive(Debug, Serialize)]
pub struct TeamWeekly {
    pub team: String,
    pub total: i64,
    pub done: i64,
    pub in_progress: i64,
    pub tasks: Vec<TaskSummary>,
}

/// Response body for `GET /api/dashboard/weekly`.
#[derive(Debug, Serialize)]
pub struct WeeklyOverview {
    pub teams: Vec<TeamWeekly>,
}

/// Per-member row of the performance report.
#[derive(Debug, Serialize)]
pub struct MemberPerformance {
    pub name: String,
    pub email: String,
    pub role: String,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub in_progress_tasks: i64,
    /// Percentage of completed tasks, rounded to one decimal. `0.0` for
    /// members with no tasks.
    pub completion_rate: f64,
    pub total_story_points: i64,
}

/// Response body for `GET /api/dashboard/performance`.
#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    pub performance: Vec<MemberPerformance>,
}

/// GET /api/dashboard/stats
pub async fn stats(
    identity: Identity,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    let filter = identity.scope.filter();
    let total_projects = state.store.count(collections::PROJECTS, &filter).await?;
    let total_stories = state.store.count(collections::STORIES, &filter).await?;
    let total_members = state.store.count(collections::TEAM_MEMBERS, &filter).await?;

    let tasks: Vec<Task> = ScopedEntities::list(
        &state.store,
        &identity.scope,
        &entities::TASK,
        serde_json::Map::new(),
    )
    .await?;

    let mut task_breakdown = TaskBreakdown::default();
    let mut priority_breakdown = PriorityBreakdown::default();
    for task in &tasks {
        match task.status {
            TaskStatus::Todo => task_breakdown.todo += 1,
            TaskStatus::InProgress => task_breakdown.in_progress += 1,
            TaskStatus::InReview => task_breakdown.in_review += 1,
            TaskStatus::Done => task_breakdown.done += 1,
            TaskStatus::Blocked => task_breakdown.blocked += 1,
        }
        match task.priority {
            Priority::High => priority_breakdown.high += 1,
            Priority::Critical => priority_breakdown.critical += 1,
            Priority::Low | Priority::Medium => {}
        }
    }

    Ok(Json(DashboardStats {
        total_projects,
        total_stories,
        total_tasks: tasks.len() as i64,
        total_members,
        task_breakdown,
        priority_breakdown,
    }))
}

/// GET /api/dashboard/weekly
pub async fn weekly(
    identity: Identity,
    State(state): State<AppState>,
) -> AppResult<Json<WeeklyOverview>> {
    let tasks: Vec<Task> = ScopedEntities::list(
        &state.store,
        &identity.scope,
        &entities::TASK,
        serde_json::Map::new(),
    )
    .await?;

    // BTreeMap keeps team order deterministic.
    let mut by_team: BTreeMap<String, Vec<&Task>> = BTreeMap::new();
    for task in &tasks {
        by_team.entry(task.team.clone()).or_default().push(task);
    }

    let teams = by_team
        .into_iter()
        .map(|(team, tasks)| {
            let done = tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Done)
                .count() as i64;
            let in_progress = tasks
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count() as i64;
            let summaries = tasks
                .iter()
                .map(|t| TaskSummary {
                    id: t.id.clone(),
                    title: t.title.clone(),
                    status: t.status,
                    assigned_to: t
                        .assigned_to
                        .clone()
                        .unwrap_or_else(|| UNASSIGNED.to_string()),
                    start_date: t.start_date.clone(),
                    end_date: t.end_date.clone(),
                    target_date: t.target_date.clone(),
                    priority: t.priority,
                })
                .collect::<Vec<_>>();

            TeamWeekly {
                team,
                total: summaries.len() as i64,
                done,
                in_progress,
                tasks: summaries,
            }
        })
        .collect();

    Ok(Json(WeeklyOverview { teams }))
}

/// GET /api/dashboard/performance
pub async fn performance(
    identity: Identity,
    State(state): State<AppState>,
) -> AppResult<Json<PerformanceReport>> {
    let members: Vec<TeamMember> = ScopedEntities::list(
        &state.store,
        &identity.scope,
        &entities::TEAM_MEMBER,
        serde_json::Map::new(),
    )
    .await?;
    let tasks: Vec<Task> = ScopedEntities::list(
        &state.store,
        &identity.scope,
        &entities::TASK,
        serde_json::Map::new(),
    )
    .await?;

    let performance = members
        .into_iter()
        .map(|member| {
            // Assignment is by display name, matching the task model.
            let mine: Vec<&Task> = tasks
                .iter()
                .filter(|t| t.assigned_to.as_deref() == Some(member.name.as_str()))
                .collect();

            let total_tasks = mine.len() as i64;
            let completed_tasks = mine
                .iter()
                .filter(|t| t.status == TaskStatus::Done)
                .count() as i64;
            let in_progress_tasks = mine
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count() as i64;
            let completion_rate = if total_tasks == 0 {
                0.0
            } else {
                (completed_tasks as f64 / total_tasks as f64 * 1000.0).round() / 10.0
            };
            let total_story_points = mine
                .iter()
                .map(|t| i64::from(t.story_points.unwrap_or(0)))
                .sum();

            MemberPerformance {
                name: member.name,
                email: member.email,
                role: member.role,
                total_tasks,
                completed_tasks,
                in_progress_tasks,
                completion_rate,
                total_story_points,
            }
        })
        .collect();

    Ok(Json(PerformanceReport { performance }))
}
