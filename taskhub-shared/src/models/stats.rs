/// Per-tenant aggregate statistics
///
/// One read-time aggregate over a tenant's projects and tasks. When no tenant
/// is resolved, the API layer returns [`TenantStats::default`], an all-zero
/// record, not an error.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::derived::completion_rate;

/// Aggregate statistics for one tenant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantStats {
    /// All projects
    pub total_projects: i64,

    /// Projects with status ACTIVE
    pub active_projects: i64,

    /// Projects with status COMPLETED
    pub completed_projects: i64,

    /// All tasks across the tenant's projects
    pub total_tasks: i64,

    /// Tasks with status DONE
    pub completed_tasks: i64,

    /// completed_tasks / total_tasks × 100, rounded to 2 decimals, 0.0 when
    /// there are no tasks
    pub completion_rate: f64,
}

impl TenantStats {
    /// Computes aggregate statistics for an organization
    pub async fn for_organization(
        pool: &PgPool,
        organization_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let (total_projects, active_projects, completed_projects, total_tasks, completed_tasks): (
            i64,
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM projects WHERE organization_id = $1),
                (SELECT COUNT(*) FROM projects
                 WHERE organization_id = $1 AND status = 'ACTIVE'),
                (SELECT COUNT(*) FROM projects
                 WHERE organization_id = $1 AND status = 'COMPLETED'),
                (SELECT COUNT(*) FROM tasks t
                 JOIN projects p ON p.id = t.project_id
                 WHERE p.organization_id = $1),
                (SELECT COUNT(*) FROM tasks t
                 JOIN projects p ON p.id = t.project_id
                 WHERE p.organization_id = $1 AND t.status = 'DONE')
            "#,
        )
        .bind(organization_id)
        .fetch_one(pool)
        .await?;

        Ok(TenantStats {
            total_projects,
            active_projects,
            completed_projects,
            total_tasks,
            completed_tasks,
            completion_rate: completion_rate(total_tasks, completed_tasks),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let stats = TenantStats::default();
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.active_projects, 0);
        assert_eq!(stats.completed_projects, 0);
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completed_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }
}
