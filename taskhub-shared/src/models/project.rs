/// Project model and database operations
///
/// Projects belong to exactly one organization, and every accessor here takes
/// the requesting organization's id. A project id belonging to a different
/// organization behaves exactly like a nonexistent id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
///     name VARCHAR(200) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status VARCHAR(20) NOT NULL DEFAULT 'ACTIVE',
///     due_date DATE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT projects_organization_id_name_key UNIQUE (organization_id, name)
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::like_pattern;

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Work is ongoing (default for new projects)
    Active,

    /// All work finished; completed projects are never overdue
    Completed,

    /// Paused
    OnHold,

    /// Retired from active use
    Archived,
}

impl ProjectStatus {
    /// Converts status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::Archived => "ARCHIVED",
        }
    }

    /// Parses status from its stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(ProjectStatus::Active),
            "COMPLETED" => Some(ProjectStatus::Completed),
            "ON_HOLD" => Some(ProjectStatus::OnHold),
            "ARCHIVED" => Some(ProjectStatus::Archived),
            _ => None,
        }
    }
}

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Owning organization
    pub organization_id: Uuid,

    /// Project name (unique within the organization)
    pub name: String,

    /// Free-text description (may be empty)
    pub description: String,

    /// Current status (stored form, see [`ProjectStatus`])
    pub status: String,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Description (empty when not supplied)
    pub description: String,

    /// Initial status (ACTIVE when not supplied)
    pub status: ProjectStatus,

    /// Optional due date
    pub due_date: Option<NaiveDate>,
}

/// Input for partially updating a project
///
/// Only `Some` fields are applied; `None` fields are left unchanged. An
/// explicit empty string is a `Some` value and is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<ProjectStatus>,

    /// New due date
    pub due_date: Option<NaiveDate>,
}

/// Filters for listing projects
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Only projects with this status
    pub status: Option<ProjectStatus>,

    /// Case-insensitive substring match over name OR description
    pub search: Option<String>,

    /// Page size (defaults to 20 at the API boundary; no upper bound)
    pub limit: i64,

    /// Rows to skip
    pub offset: i64,
}

impl Project {
    /// Creates a new project under an organization
    ///
    /// # Errors
    ///
    /// Returns an error on a name collision within the organization or any
    /// other database failure.
    pub async fn create(
        pool: &PgPool,
        organization_id: Uuid,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (organization_id, name, description, status, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organization_id, name, description, status, due_date,
                      created_at, updated_at
            "#,
        )
        .bind(organization_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.status.as_str())
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID within an organization
    ///
    /// Returns None both for unknown ids and for ids owned by other
    /// organizations.
    pub async fn find_for_organization(
        pool: &PgPool,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, organization_id, name, description, status, due_date,
                   created_at, updated_at
            FROM projects
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists projects for an organization with filtering and pagination
    ///
    /// Ordered by creation time (newest first), then name.
    pub async fn list_for_organization(
        pool: &PgPool,
        organization_id: Uuid,
        filter: ProjectFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let search = filter.search.as_deref().map(like_pattern);

        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, organization_id, name, description, status, due_date,
                   created_at, updated_at
            FROM projects
            WHERE organization_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR description ILIKE $3)
            ORDER BY created_at DESC, name ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(organization_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(search)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Partially updates a project within an organization
    ///
    /// Only `Some` fields in `data` are applied. Returns None when the
    /// project does not exist under this organization.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        organization_id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${bind_count}"));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${bind_count}"));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${bind_count}"));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${bind_count}"));
        }

        query.push_str(
            " WHERE id = $1 AND organization_id = $2 \
             RETURNING id, organization_id, name, description, status, due_date, \
             created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(organization_id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status.as_str());
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        let project = q.fetch_optional(pool).await?;

        Ok(project)
    }

    /// Deletes a project within an organization
    ///
    /// Cascades to all of the project's tasks and their comments. Returns
    /// false when the project does not exist under this organization.
    pub async fn delete(
        pool: &PgPool,
        id: Uuid,
        organization_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Loads (total, completed) task counts for a project
    ///
    /// Feed these into [`crate::derived::completion_rate`].
    pub async fn task_counts(pool: &PgPool, project_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'DONE')
            FROM tasks
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_as_str() {
        assert_eq!(ProjectStatus::Active.as_str(), "ACTIVE");
        assert_eq!(ProjectStatus::Completed.as_str(), "COMPLETED");
        assert_eq!(ProjectStatus::OnHold.as_str(), "ON_HOLD");
        assert_eq!(ProjectStatus::Archived.as_str(), "ARCHIVED");
    }

    #[test]
    fn test_project_status_parse() {
        assert_eq!(ProjectStatus::parse("ACTIVE"), Some(ProjectStatus::Active));
        assert_eq!(ProjectStatus::parse("ON_HOLD"), Some(ProjectStatus::OnHold));
        assert_eq!(ProjectStatus::parse("on_hold"), None);
        assert_eq!(ProjectStatus::parse(""), None);
    }

    #[test]
    fn test_update_project_default_is_noop() {
        let update = UpdateProject::default();
        assert!(update.name.is_none());
        assert!(update.description.is_none());
        assert!(update.status.is_none());
        assert!(update.due_date.is_none());
    }

    #[test]
    fn test_explicit_empty_description_is_applied() {
        // An explicit empty string is Some and must be written through
        let update = UpdateProject {
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(update.description.as_deref(), Some(""));
    }
}
