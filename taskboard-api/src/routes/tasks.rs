/// Task endpoints
///
/// CRUD + filtered listing over tasks. Authorization is transitive:
/// every lookup resolves through the parent project's owner, never
/// through `assigned_to`. Creation and status/assignee changes enqueue
/// fire-and-forget notification jobs; enqueue failures are logged and
/// never fail the request.
///
/// # Endpoints
///
/// - `POST /tasks` - create (404 if the target project is not owned)
/// - `GET /tasks` - list with filters, sort, and pagination
/// - `GET /tasks/:id` - fetch one
/// - `PATCH /tasks/:id` - full-replacement update
/// - `DELETE /tasks/:id` - delete (no notification)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::project::Project,
    models::task::{Page, Task, TaskData, TaskFilter, TaskSort},
    queue::NotificationJob,
};
use uuid::Uuid;

/// Create/update payload
///
/// The same shape serves create and update; updates are full
/// replacement, so omitted optional fields reset to their defaults
/// (status "todo", priority 3) or to null.
#[derive(Debug, Deserialize)]
pub struct TaskPayload {
    /// Task title
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional due date (date-only)
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Status; not validated against the conventional set
    #[serde(default = "default_status")]
    pub status: String,

    /// Priority; not validated against 1..=3
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Target project
    pub project_id: Uuid,

    /// Optional assignee; existence is not checked here
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
}

fn default_status() -> String {
    "todo".to_string()
}

fn default_priority() -> i32 {
    3
}

impl From<TaskPayload> for TaskData {
    fn from(payload: TaskPayload) -> Self {
        TaskData {
            project_id: payload.project_id,
            title: payload.title,
            description: payload.description,
            status: payload.status,
            priority: payload.priority,
            due_date: payload.due_date,
            assigned_to: payload.assigned_to,
        }
    }
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    /// Exact status match
    pub status: Option<String>,

    /// Exact priority match
    pub priority: Option<i32>,

    /// Exact due-date match, `YYYY-MM-DD`
    pub due_date: Option<String>,

    /// Restrict to one project
    pub project_id: Option<Uuid>,

    /// "priority" or "due_date"; anything else is ignored
    pub sort_by: Option<String>,

    /// Rows to skip (default 0)
    pub skip: Option<i64>,

    /// Rows to return (default 10, no upper bound)
    pub limit: Option<i64>,
}

/// Deletion acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Parses the `due_date` filter before any storage access
fn parse_due_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest("Invalid date format, use YYYY-MM-DD".to_string()))
}

/// Decides whether an update warrants a notification
///
/// True when the stored status or assignee differs from the incoming
/// payload. An unchanged update enqueues nothing.
fn update_notifies(existing: &Task, incoming: &TaskData) -> bool {
    existing.status != incoming.status || existing.assigned_to != incoming.assigned_to
}

/// Enqueues a job, swallowing broker failures
///
/// The mutation has already committed; a lost notification is the
/// documented reliability gap, not a request failure.
async fn enqueue_best_effort(state: &AppState, job: NotificationJob) {
    if let Err(e) = state.queue.enqueue(&job).await {
        tracing::warn!(error = %e, action = %job.action, "Failed to enqueue notification");
    }
}

/// Creates a task in a project owned by the caller
///
/// The project is resolved scoped to the caller first; a foreign or
/// absent project is a 404 and nothing is written. If the new task has
/// an assignee, an "Assigned" notification is enqueued after the
/// insert.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<TaskPayload>,
) -> ApiResult<Json<Task>> {
    Project::find_by_id_for_owner(&state.db, payload.project_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let task = Task::create(&state.db, payload.into()).await?;

    if task.assigned_to.is_some() {
        enqueue_best_effort(
            &state,
            NotificationJob {
                task_title: task.title.clone(),
                user_id: task.assigned_to,
                action: "Assigned".to_string(),
            },
        )
        .await;
    }

    Ok(Json(task))
}

/// Lists the caller's tasks with optional filters, sort, and pagination
///
/// # Errors
///
/// `400 Bad Request` on a malformed `due_date`, before touching
/// storage.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let due_date = match &query.due_date {
        Some(raw) => Some(parse_due_date(raw)?),
        None => None,
    };

    let filter = TaskFilter {
        status: query.status,
        priority: query.priority,
        due_date,
        project_id: query.project_id,
    };

    let sort = TaskSort::from_key(query.sort_by.as_deref());
    let page = Page {
        skip: query.skip.unwrap_or(0),
        limit: query.limit.unwrap_or(10),
    };

    let tasks = Task::list_for_owner(&state.db, auth.user_id, &filter, sort, page).await?;
    Ok(Json(tasks))
}

/// Fetches one task
///
/// # Errors
///
/// `404 Not Found` if the task is absent or its project is owned by
/// someone else.
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id_for_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;
    Ok(Json(task))
}

/// Replaces a task's fields
///
/// Full replacement of every payload field. If the status or assignee
/// changed, enqueues a notification whose action is the new status and
/// whose recipient is the new assignee — even when the new assignee is
/// empty (the worker no-ops on delivery).
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskPayload>,
) -> ApiResult<Json<Task>> {
    let existing = Task::find_by_id_for_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let data: TaskData = payload.into();
    let notify = update_notifies(&existing, &data);

    let task = Task::replace(&state.db, id, data).await?;

    if notify {
        enqueue_best_effort(
            &state,
            NotificationJob {
                task_title: task.title.clone(),
                user_id: task.assigned_to,
                action: task.status.clone(),
            },
        )
        .await;
    }

    Ok(Json(task))
}

/// Deletes a task
///
/// No notification is sent for deletions.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Task::delete(&state.db, id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stored_task(status: &str, assigned_to: Option<Uuid>) -> Task {
        Task {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            title: "Write report".to_string(),
            description: None,
            status: status.to_string(),
            priority: 3,
            due_date: None,
            assigned_to,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn incoming(task: &Task, status: &str, assigned_to: Option<Uuid>) -> TaskData {
        TaskData {
            project_id: task.project_id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: status.to_string(),
            priority: task.priority,
            due_date: task.due_date,
            assigned_to,
        }
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(
            parse_due_date("2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!(matches!(
            parse_due_date("not-a-date"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            parse_due_date("14-03-2025"),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_status_change_notifies() {
        let task = stored_task("todo", None);
        let data = incoming(&task, "done", None);
        assert!(update_notifies(&task, &data));
    }

    #[test]
    fn test_assignee_change_notifies_even_to_null() {
        let assignee = Some(Uuid::new_v4());
        let task = stored_task("todo", assignee);
        // Unassigning still triggers a job; the worker drops it at
        // delivery time when there is no recipient.
        let data = incoming(&task, "todo", None);
        assert!(update_notifies(&task, &data));
    }

    #[test]
    fn test_unchanged_update_does_not_notify() {
        let assignee = Some(Uuid::new_v4());
        let task = stored_task("in_progress", assignee);
        let data = incoming(&task, "in_progress", assignee);
        assert!(!update_notifies(&task, &data));
    }

    #[test]
    fn test_payload_defaults() {
        let json = format!(
            "{{\"title\":\"T\",\"project_id\":\"{}\"}}",
            Uuid::new_v4()
        );
        let payload: TaskPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload.status, "todo");
        assert_eq!(payload.priority, 3);
        assert!(payload.description.is_none());
        assert!(payload.due_date.is_none());
        assert!(payload.assigned_to.is_none());
    }

    #[test]
    fn test_payload_accepts_out_of_set_values() {
        // Status and priority are deliberately unvalidated free-form
        // values; they pass through to storage as-is.
        let json = format!(
            "{{\"title\":\"T\",\"project_id\":\"{}\",\"status\":\"blocked\",\"priority\":42}}",
            Uuid::new_v4()
        );
        let payload: TaskPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload.status, "blocked");
        assert_eq!(payload.priority, 42);
    }
}
