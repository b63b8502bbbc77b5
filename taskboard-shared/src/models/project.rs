/// Project model and database operations
///
/// Every project is owned by exactly one user, and all authorization for
/// the project and its tasks derives from `owner_id`. All lookups here
/// are scoped: the queries filter by both id and owner in one step, so a
/// project owned by someone else is indistinguishable from one that does
/// not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     description TEXT,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Deleting a project cascades to its tasks via the schema's
/// `ON DELETE CASCADE`; no service code is involved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project name (no uniqueness constraint)
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Owning user
    pub owner_id: Uuid,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Project fields supplied by the caller
///
/// Used for both create and update; updates are full replacement, so the
/// same shape applies.
#[derive(Debug, Clone)]
pub struct ProjectData {
    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

impl Project {
    /// Creates a new project owned by `owner_id`
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        data: ProjectData,
    ) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, owner_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects owned by `owner_id`
    ///
    /// No explicit ordering; callers observe insertion order in
    /// practice.
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, created_at
            FROM projects
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Finds a project by ID, scoped to its owner
    ///
    /// Returns `None` both when the project does not exist and when it
    /// is owned by a different user.
    pub async fn find_by_id_for_owner(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, created_at
            FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Replaces a project's mutable fields, scoped to its owner
    ///
    /// Full replacement: both name and description are overwritten with
    /// the supplied values. Returns `None` under the same rule as
    /// [`Project::find_by_id_for_owner`].
    pub async fn replace(
        pool: &PgPool,
        id: Uuid,
        owner_id: Uuid,
        data: ProjectData,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $3, description = $4
            WHERE id = $1 AND owner_id = $2
            RETURNING id, name, description, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.name)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project, scoped to its owner
    ///
    /// Returns `true` if a row was deleted. The project's tasks go with
    /// it through the schema cascade.
    pub async fn delete(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
