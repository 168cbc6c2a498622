/// Organization model and database operations
///
/// Organizations are the tenant root: every project, task, and comment is
/// owned (directly or through its parent chain) by exactly one organization,
/// and all scoped queries start from an organization id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(100) NOT NULL UNIQUE,
///     slug VARCHAR(100) NOT NULL UNIQUE,
///     contact_email VARCHAR(254) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskhub_shared::models::organization::{CreateOrganization, Organization};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let org = Organization::create(&pool, CreateOrganization {
///     name: "Test Org".to_string(),
///     contact_email: "admin@test.org".to_string(),
///     slug: None,
/// }).await?;
/// assert_eq!(org.slug, "test-org");
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::derived::slugify;

/// Organization model: the unit of data isolation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Unique organization ID
    pub id: Uuid,

    /// Organization name (globally unique)
    pub name: String,

    /// URL slug (globally unique, derived from name when not supplied)
    pub slug: String,

    /// Contact email address
    pub contact_email: String,

    /// Inactive organizations do not resolve as tenants
    pub is_active: bool,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    /// Organization name
    pub name: String,

    /// Contact email address
    pub contact_email: String,

    /// Explicit slug; derived from the name when None
    pub slug: Option<String>,
}

impl Organization {
    /// Creates a new organization
    ///
    /// The slug is derived from the name via lowercase-hyphenation unless an
    /// explicit slug is supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or slug collides with an existing
    /// organization, or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateOrganization) -> Result<Self, sqlx::Error> {
        let slug = match data.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => slugify(&data.name),
        };

        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, slug, contact_email)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, contact_email, is_active, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(slug)
        .bind(data.contact_email)
        .fetch_one(pool)
        .await?;

        Ok(organization)
    }

    /// Finds an active organization by slug
    ///
    /// This is the tenant lookup used by the resolver middleware and the
    /// `organization(slug:)` query. Inactive organizations are invisible here.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, contact_email, is_active, created_at, updated_at
            FROM organizations
            WHERE slug = $1 AND is_active = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(organization)
    }

    /// Lists all active organizations, ordered by name
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let organizations = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, contact_email, is_active, created_at, updated_at
            FROM organizations
            WHERE is_active = TRUE
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(organizations)
    }

    /// Finds an organization by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, contact_email, is_active, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(organization)
    }

    /// Counts projects owned by an organization
    pub async fn project_count(pool: &PgPool, organization_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM projects WHERE organization_id = $1")
                .bind(organization_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Counts tasks owned by an organization (across all of its projects)
    pub async fn task_count(pool: &PgPool, organization_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM tasks t
            JOIN projects p ON p.id = t.project_id
            WHERE p.organization_id = $1
            "#,
        )
        .bind(organization_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_organization_without_slug() {
        let create = CreateOrganization {
            name: "Test Org".to_string(),
            contact_email: "admin@test.org".to_string(),
            slug: None,
        };
        assert!(create.slug.is_none());
        assert_eq!(slugify(&create.name), "test-org");
    }

    // Database-backed coverage lives in tests/tenant_scoping_tests.rs
}
