/// Task model and database operations
///
/// Tasks belong to exactly one project; a task's effective owner is its
/// project's owner and every query here authorizes by joining through
/// `projects.owner_id`. The optional `assigned_to` user is a weak
/// reference used only for notifications — it never grants access.
///
/// Status is free text by convention (todo / in_progress / done) and
/// priority an integer (1=High, 2=Medium, 3=Low); neither is validated
/// at write time, so out-of-set values pass through to storage.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     description TEXT,
///     status TEXT NOT NULL DEFAULT 'todo',
///     priority INTEGER NOT NULL DEFAULT 3,
///     due_date DATE,
///     assigned_to UUID REFERENCES users(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Columns selected by every task query, qualified for the project join
const TASK_COLUMNS: &str = "t.id, t.project_id, t.title, t.description, t.status, \
     t.priority, t.due_date, t.assigned_to, t.created_at, t.updated_at";

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Parent project (authorization scope)
    pub project_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Status string (conventionally todo / in_progress / done)
    pub status: String,

    /// Priority (1=High, 2=Medium, 3=Low)
    pub priority: i32,

    /// Optional due date (date-only semantics)
    pub due_date: Option<NaiveDate>,

    /// Assigned user, if any (weak reference)
    pub assigned_to: Option<Uuid>,

    /// Set once at creation
    pub created_at: DateTime<Utc>,

    /// Set on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Task fields supplied by the caller
///
/// Used for both create and update. Updates are full replacement:
/// every field here overwrites the stored value, `project_id` included.
#[derive(Debug, Clone)]
pub struct TaskData {
    /// Parent project
    pub project_id: Uuid,

    /// Title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Status (callers default this to "todo")
    pub status: String,

    /// Priority (callers default this to 3)
    pub priority: i32,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,
}

/// Optional exact-match filters for task listing
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Exact status match
    pub status: Option<String>,

    /// Exact priority match
    pub priority: Option<i32>,

    /// Exact due-date match
    pub due_date: Option<NaiveDate>,

    /// Restrict to one project (still scoped to the owner)
    pub project_id: Option<Uuid>,
}

/// Explicit sort keys for task listing
///
/// Anything other than "priority" or "due_date" means no explicit
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSort {
    /// Ascending by priority (High first)
    Priority,

    /// Ascending by due date
    DueDate,
}

impl TaskSort {
    /// Parses a `sort_by` query value; unknown keys sort nothing
    pub fn from_key(key: Option<&str>) -> Option<Self> {
        match key {
            Some("priority") => Some(TaskSort::Priority),
            Some("due_date") => Some(TaskSort::DueDate),
            _ => None,
        }
    }
}

/// Offset pagination
#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// Rows to skip
    pub skip: i64,

    /// Rows to return (no upper bound enforced)
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

/// Builds the filtered, sorted, paginated listing query
///
/// Kept separate from execution so the generated SQL shape is testable
/// without a database.
fn build_list_query(
    owner_id: Uuid,
    filter: &TaskFilter,
    sort: Option<TaskSort>,
    page: Page,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {TASK_COLUMNS} FROM tasks t \
         JOIN projects p ON p.id = t.project_id \
         WHERE p.owner_id = "
    ));
    qb.push_bind(owner_id);

    if let Some(status) = &filter.status {
        qb.push(" AND t.status = ").push_bind(status.clone());
    }
    if let Some(priority) = filter.priority {
        qb.push(" AND t.priority = ").push_bind(priority);
    }
    if let Some(due_date) = filter.due_date {
        qb.push(" AND t.due_date = ").push_bind(due_date);
    }
    if let Some(project_id) = filter.project_id {
        qb.push(" AND t.project_id = ").push_bind(project_id);
    }

    match sort {
        Some(TaskSort::Priority) => {
            qb.push(" ORDER BY t.priority ASC");
        }
        Some(TaskSort::DueDate) => {
            qb.push(" ORDER BY t.due_date ASC");
        }
        None => {}
    }

    qb.push(" LIMIT ").push_bind(page.limit);
    qb.push(" OFFSET ").push_bind(page.skip);

    qb
}

impl Task {
    /// Creates a new task
    ///
    /// The caller is responsible for having resolved the parent project
    /// scoped to the requester first; this insert applies the fields as
    /// given without further validation.
    pub async fn create(pool: &PgPool, data: TaskData) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, description, status, priority, due_date, assigned_to)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, project_id, title, description, status, priority,
                      due_date, assigned_to, created_at, updated_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(data.assigned_to)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, scoped transitively through project ownership
    ///
    /// Returns `None` when the task does not exist or its parent project
    /// belongs to a different user — the two are indistinguishable.
    pub async fn find_by_id_for_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks t \
             JOIN projects p ON p.id = t.project_id \
             WHERE t.id = $1 AND p.owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks across all projects owned by `owner_id`
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        filter: &TaskFilter,
        sort: Option<TaskSort>,
        page: Page,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = build_list_query(owner_id, filter, sort, page);
        let tasks = query.build_query_as::<Task>().fetch_all(pool).await?;
        Ok(tasks)
    }

    /// Replaces every mutable field of a task
    ///
    /// Full replacement of the payload fields, `project_id` included.
    /// The caller must have already resolved the task through
    /// [`Task::find_by_id_for_owner`]; concurrent replacements race at
    /// the storage layer with last-writer-wins outcome.
    pub async fn replace(pool: &PgPool, id: Uuid, data: TaskData) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET project_id = $2,
                title = $3,
                description = $4,
                status = $5,
                priority = $6,
                due_date = $7,
                assigned_to = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, project_id, title, description, status, priority,
                      due_date, assigned_to, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(data.assigned_to)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, scoped through project ownership
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
              AND project_id IN (SELECT id FROM projects WHERE owner_id = $2)
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(filter: &TaskFilter, sort: Option<TaskSort>, page: Page) -> String {
        build_list_query(Uuid::new_v4(), filter, sort, page)
            .sql()
            .to_string()
    }

    #[test]
    fn test_list_query_always_scopes_by_owner() {
        let sql = sql_for(&TaskFilter::default(), None, Page::default());
        assert!(sql.contains("JOIN projects p ON p.id = t.project_id"));
        assert!(sql.contains("WHERE p.owner_id = $1"));
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn test_list_query_combines_filters() {
        let filter = TaskFilter {
            status: Some("done".to_string()),
            priority: Some(1),
            due_date: None,
            project_id: None,
        };
        let sql = sql_for(&filter, None, Page::default());
        assert!(sql.contains("t.status = $2"));
        assert!(sql.contains("t.priority = $3"));
        assert!(sql.contains("LIMIT $4 OFFSET $5"));
    }

    #[test]
    fn test_list_query_sorts() {
        let sql = sql_for(
            &TaskFilter::default(),
            Some(TaskSort::Priority),
            Page::default(),
        );
        assert!(sql.contains("ORDER BY t.priority ASC"));

        let sql = sql_for(
            &TaskFilter::default(),
            Some(TaskSort::DueDate),
            Page::default(),
        );
        assert!(sql.contains("ORDER BY t.due_date ASC"));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!(TaskSort::from_key(Some("priority")), Some(TaskSort::Priority));
        assert_eq!(TaskSort::from_key(Some("due_date")), Some(TaskSort::DueDate));
        assert_eq!(TaskSort::from_key(Some("title")), None);
        assert_eq!(TaskSort::from_key(None), None);
    }

    #[test]
    fn test_page_defaults() {
        let page = Page::default();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 10);
    }
}
