/// GraphQL query root
///
/// Every field except the organization lookups is tenant-scoped through the
/// [`TenantContext`] in the request data. The soft-fail policy: with no
/// resolved tenant, list fields return an empty list, lookups return null,
/// and `projectStats` returns an all-zero record, never a GraphQL error.
/// An id belonging to another tenant behaves exactly like an unknown id.

use async_graphql::{Context, Object, Result, ID};
use sqlx::PgPool;
use uuid::Uuid;

use taskhub_shared::models::comment::TaskComment;
use taskhub_shared::models::organization::Organization;
use taskhub_shared::models::project::{Project, ProjectFilter};
use taskhub_shared::models::stats::TenantStats;
use taskhub_shared::models::task::{Task, TaskFilter};

use crate::schema::types::{
    OrganizationType, ProjectStatsType, ProjectStatusType, ProjectType, TaskCommentType,
    TaskStatusType, TaskType,
};
use crate::tenant::TenantContext;

/// Parses a GraphQL ID as a UUID; a malformed id matches nothing, same as an
/// unknown one.
fn parse_id(id: &ID) -> Option<Uuid> {
    Uuid::parse_str(id.as_str()).ok()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Looks up an active organization by slug
    async fn organization(
        &self,
        ctx: &Context<'_>,
        slug: String,
    ) -> Result<Option<OrganizationType>> {
        let pool = ctx.data::<PgPool>()?;
        let organization = Organization::find_active_by_slug(pool, &slug).await?;
        Ok(organization.map(OrganizationType))
    }

    /// Lists all active organizations
    async fn organizations(&self, ctx: &Context<'_>) -> Result<Vec<OrganizationType>> {
        let pool = ctx.data::<PgPool>()?;
        let organizations = Organization::list_active(pool).await?;
        Ok(organizations.into_iter().map(OrganizationType).collect())
    }

    /// Lists the tenant's projects with optional filters
    async fn projects(
        &self,
        ctx: &Context<'_>,
        status: Option<ProjectStatusType>,
        search: Option<String>,
        #[graphql(default = 20)] limit: i64,
        #[graphql(default = 0)] offset: i64,
    ) -> Result<Vec<ProjectType>> {
        let pool = ctx.data::<PgPool>()?;
        let tenant = ctx.data::<TenantContext>()?;
        let Some(organization) = tenant.organization() else {
            return Ok(vec![]);
        };

        let filter = ProjectFilter {
            status: status.map(ProjectStatusType::into_model),
            search,
            limit,
            offset,
        };

        let projects = Project::list_for_organization(pool, organization.id, filter).await?;
        Ok(projects.into_iter().map(ProjectType).collect())
    }

    /// Looks up one of the tenant's projects by id
    async fn project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProjectType>> {
        let pool = ctx.data::<PgPool>()?;
        let tenant = ctx.data::<TenantContext>()?;
        let (Some(organization), Some(id)) = (tenant.organization(), parse_id(&id)) else {
            return Ok(None);
        };

        let project = Project::find_for_organization(pool, id, organization.id).await?;
        Ok(project.map(ProjectType))
    }

    /// Lists the tenant's tasks with optional filters
    #[allow(clippy::too_many_arguments)]
    async fn tasks(
        &self,
        ctx: &Context<'_>,
        project_id: Option<ID>,
        status: Option<TaskStatusType>,
        assignee_email: Option<String>,
        search: Option<String>,
        #[graphql(default = 20)] limit: i64,
        #[graphql(default = 0)] offset: i64,
    ) -> Result<Vec<TaskType>> {
        let pool = ctx.data::<PgPool>()?;
        let tenant = ctx.data::<TenantContext>()?;
        let Some(organization) = tenant.organization() else {
            return Ok(vec![]);
        };

        // A malformed project id filter cannot match any task
        let project_id = match project_id {
            Some(id) => match parse_id(&id) {
                Some(uuid) => Some(uuid),
                None => return Ok(vec![]),
            },
            None => None,
        };

        let filter = TaskFilter {
            project_id,
            status: status.map(TaskStatusType::into_model),
            assignee_email,
            search,
            limit,
            offset,
        };

        let tasks = Task::list_for_organization(pool, organization.id, filter).await?;
        Ok(tasks.into_iter().map(TaskType).collect())
    }

    /// Looks up one of the tenant's tasks by id
    async fn task(&self, ctx: &Context<'_>, id: ID) -> Result<Option<TaskType>> {
        let pool = ctx.data::<PgPool>()?;
        let tenant = ctx.data::<TenantContext>()?;
        let (Some(organization), Some(id)) = (tenant.organization(), parse_id(&id)) else {
            return Ok(None);
        };

        let task = Task::find_for_organization(pool, id, organization.id).await?;
        Ok(task.map(TaskType))
    }

    /// Lists comments on one of the tenant's tasks
    async fn task_comments(&self, ctx: &Context<'_>, task_id: ID) -> Result<Vec<TaskCommentType>> {
        let pool = ctx.data::<PgPool>()?;
        let tenant = ctx.data::<TenantContext>()?;
        let (Some(organization), Some(task_id)) = (tenant.organization(), parse_id(&task_id))
        else {
            return Ok(vec![]);
        };

        let comments = TaskComment::list_for_task(pool, task_id, organization.id).await?;
        Ok(comments.into_iter().map(TaskCommentType).collect())
    }

    /// Aggregate statistics for the tenant; all-zero with no tenant
    async fn project_stats(&self, ctx: &Context<'_>) -> Result<ProjectStatsType> {
        let pool = ctx.data::<PgPool>()?;
        let tenant = ctx.data::<TenantContext>()?;
        let Some(organization) = tenant.organization() else {
            return Ok(ProjectStatsType(TenantStats::default()));
        };

        let stats = TenantStats::for_organization(pool, organization.id).await?;
        Ok(ProjectStatsType(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = ID::from("550e8400-e29b-41d4-a716-446655440000");
        assert!(parse_id(&id).is_some());

        let bad = ID::from("not-a-uuid");
        assert!(parse_id(&bad).is_none());
    }
}
