/// Task model and database operations
///
/// Tasks belong to exactly one project. Tenant scoping goes through the
/// parent: every accessor joins against `projects` and checks the
/// organization id, so a task under another tenant's project is
/// indistinguishable from a nonexistent one.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status VARCHAR(20) NOT NULL DEFAULT 'TODO',
///     priority VARCHAR(20) NOT NULL DEFAULT 'MEDIUM',
///     assignee_email VARCHAR(254) NOT NULL DEFAULT '',
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::like_pattern;

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started (default for new tasks)
    Todo,

    /// Being worked on
    InProgress,

    /// Finished; done tasks are never overdue
    Done,

    /// Cannot proceed
    Blocked,
}

impl TaskStatus {
    /// Converts status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
            TaskStatus::Blocked => "BLOCKED",
        }
    }

    /// Parses status from its stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TODO" => Some(TaskStatus::Todo),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "DONE" => Some(TaskStatus::Done),
            "BLOCKED" => Some(TaskStatus::Blocked),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Converts priority to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
            TaskPriority::Urgent => "URGENT",
        }
    }

    /// Parses priority from its stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(TaskPriority::Low),
            "MEDIUM" => Some(TaskPriority::Medium),
            "HIGH" => Some(TaskPriority::High),
            "URGENT" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning project
    pub project_id: Uuid,

    /// Task title
    pub title: String,

    /// Free-text description (may be empty)
    pub description: String,

    /// Current status (stored form, see [`TaskStatus`])
    pub status: String,

    /// Priority (stored form, see [`TaskPriority`])
    pub priority: String,

    /// Assignee email (empty when unassigned)
    pub assignee_email: String,

    /// Optional due datetime
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Description (empty when not supplied)
    pub description: String,

    /// Initial status (TODO when not supplied)
    pub status: TaskStatus,

    /// Priority (MEDIUM when not supplied)
    pub priority: TaskPriority,

    /// Assignee email (empty when not supplied)
    pub assignee_email: String,

    /// Optional due datetime
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for partially updating a task
///
/// Only `Some` fields are applied; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New assignee email
    pub assignee_email: Option<String>,

    /// New due datetime
    pub due_date: Option<DateTime<Utc>>,
}

/// Filters for listing tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Only tasks under this project
    pub project_id: Option<Uuid>,

    /// Only tasks with this status
    pub status: Option<TaskStatus>,

    /// Only tasks assigned to this email (exact match)
    pub assignee_email: Option<String>,

    /// Case-insensitive substring match over title OR description
    pub search: Option<String>,

    /// Page size (defaults to 20 at the API boundary; no upper bound)
    pub limit: i64,

    /// Rows to skip
    pub offset: i64,
}

impl Task {
    /// Creates a new task under a project
    ///
    /// The caller must have already resolved the project within the
    /// requesting organization.
    pub async fn create(
        pool: &PgPool,
        project_id: Uuid,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, description, status, priority,
                               assignee_email, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, project_id, title, description, status, priority,
                      assignee_email, due_date, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status.as_str())
        .bind(data.priority.as_str())
        .bind(data.assignee_email)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID within an organization
    ///
    /// Returns None both for unknown ids and for tasks whose project belongs
    /// to a different organization.
    pub async fn find_for_organization(
        pool: &PgPool,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.status, t.priority,
                   t.assignee_email, t.due_date, t.created_at, t.updated_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = $1 AND p.organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks for an organization with filtering and pagination
    ///
    /// Ordered by creation time (newest first).
    pub async fn list_for_organization(
        pool: &PgPool,
        organization_id: Uuid,
        filter: TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let search = filter.search.as_deref().map(like_pattern);

        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.project_id, t.title, t.description, t.status, t.priority,
                   t.assignee_email, t.due_date, t.created_at, t.updated_at
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE p.organization_id = $1
              AND ($2::uuid IS NULL OR t.project_id = $2)
              AND ($3::text IS NULL OR t.status = $3)
              AND ($4::text IS NULL OR t.assignee_email = $4)
              AND ($5::text IS NULL OR t.title ILIKE $5 OR t.description ILIKE $5)
            ORDER BY t.created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(organization_id)
        .bind(filter.project_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.assignee_email)
        .bind(search)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Partially updates a task within an organization
    ///
    /// Only `Some` fields in `data` are applied. Returns None when the task
    /// does not exist under this organization.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        organization_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${bind_count}"));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${bind_count}"));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${bind_count}"));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${bind_count}"));
        }
        if data.assignee_email.is_some() {
            bind_count += 1;
            query.push_str(&format!(", assignee_email = ${bind_count}"));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${bind_count}"));
        }

        query.push_str(
            " WHERE id = $1 AND project_id IN \
             (SELECT id FROM projects WHERE organization_id = $2) \
             RETURNING id, project_id, title, description, status, priority, \
             assignee_email, due_date, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(organization_id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status.as_str());
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority.as_str());
        }
        if let Some(assignee_email) = data.assignee_email {
            q = q.bind(assignee_email);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task within an organization
    ///
    /// Cascades to the task's comments. Returns false when the task does not
    /// exist under this organization.
    pub async fn delete(
        pool: &PgPool,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND project_id IN
                  (SELECT id FROM projects WHERE organization_id = $2)
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts comments on a task
    pub async fn comment_count(pool: &PgPool, task_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM task_comments WHERE task_id = $1")
                .bind(task_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_round_trip() {
        for status in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::Blocked,
        ] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("RUNNING"), None);
    }

    #[test]
    fn test_task_priority_round_trip() {
        for priority in [
            TaskPriority::Low,
            TaskPriority::Medium,
            TaskPriority::High,
            TaskPriority::Urgent,
        ] {
            assert_eq!(TaskPriority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(TaskPriority::parse("CRITICAL"), None);
    }

    #[test]
    fn test_update_task_default_is_noop() {
        let update = UpdateTask::default();
        assert!(update.title.is_none());
        assert!(update.status.is_none());
        assert!(update.due_date.is_none());
    }

    #[test]
    fn test_task_filter_defaults() {
        let filter = TaskFilter::default();
        assert!(filter.project_id.is_none());
        assert!(filter.status.is_none());
        assert!(filter.assignee_email.is_none());
        assert!(filter.search.is_none());
    }
}
