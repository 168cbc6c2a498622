/// Task comment model and database operations
///
/// Comments are the leaves of the ownership tree. Scoping goes through two
/// joins (comment → task → project → organization).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     content TEXT NOT NULL,
///     author_email VARCHAR(254) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task comment model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskComment {
    /// Unique comment ID
    pub id: Uuid,

    /// Task this comment is on
    pub task_id: Uuid,

    /// Comment body
    pub content: String,

    /// Author email address
    pub author_email: String,

    /// When the comment was created
    pub created_at: DateTime<Utc>,

    /// When the comment was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// Comment body
    pub content: String,

    /// Author email address
    pub author_email: String,
}

impl TaskComment {
    /// Creates a new comment on a task
    ///
    /// The caller must have already resolved the task within the requesting
    /// organization.
    pub async fn create(
        pool: &PgPool,
        task_id: Uuid,
        data: CreateComment,
    ) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, TaskComment>(
            r#"
            INSERT INTO task_comments (task_id, content, author_email)
            VALUES ($1, $2, $3)
            RETURNING id, task_id, content, author_email, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(data.content)
        .bind(data.author_email)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Lists comments on a task within an organization
    ///
    /// A task id under another organization yields an empty list, same as an
    /// unknown id. Ordered by creation time (newest first).
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: Uuid,
        organization_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let comments = sqlx::query_as::<_, TaskComment>(
            r#"
            SELECT c.id, c.task_id, c.content, c.author_email, c.created_at, c.updated_at
            FROM task_comments c
            JOIN tasks t ON t.id = c.task_id
            JOIN projects p ON p.id = t.project_id
            WHERE c.task_id = $1 AND p.organization_id = $2
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(task_id)
        .bind(organization_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }
}
