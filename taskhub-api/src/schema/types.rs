/// GraphQL object types
///
/// Thin wrappers over the shared models. Stored fields resolve straight off
/// the row; derived fields (counts, rates, overdue flags) load the child
/// counts they need and delegate to the pure functions in
/// `taskhub_shared::derived`, so nothing derived is ever persisted.

use async_graphql::{Context, Enum, Object, Result, SimpleObject, ID};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use taskhub_shared::derived::{completion_rate, project_is_overdue, task_is_overdue};
use taskhub_shared::models::comment::TaskComment;
use taskhub_shared::models::organization::Organization;
use taskhub_shared::models::project::{Project, ProjectStatus};
use taskhub_shared::models::stats::TenantStats;
use taskhub_shared::models::task::{Task, TaskPriority, TaskStatus};

use crate::tenant::TenantContext;

/// Project lifecycle status
#[derive(Debug, Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "ProjectStatus")]
pub enum ProjectStatusType {
    Active,
    Completed,
    OnHold,
    Archived,
}

impl ProjectStatusType {
    pub fn into_model(self) -> ProjectStatus {
        match self {
            ProjectStatusType::Active => ProjectStatus::Active,
            ProjectStatusType::Completed => ProjectStatus::Completed,
            ProjectStatusType::OnHold => ProjectStatus::OnHold,
            ProjectStatusType::Archived => ProjectStatus::Archived,
        }
    }

    pub fn from_stored(s: &str) -> Result<Self> {
        match ProjectStatus::parse(s) {
            Some(ProjectStatus::Active) => Ok(ProjectStatusType::Active),
            Some(ProjectStatus::Completed) => Ok(ProjectStatusType::Completed),
            Some(ProjectStatus::OnHold) => Ok(ProjectStatusType::OnHold),
            Some(ProjectStatus::Archived) => Ok(ProjectStatusType::Archived),
            None => Err(format!("unknown project status: {s}").into()),
        }
    }
}

/// Task workflow status
#[derive(Debug, Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "TaskStatus")]
pub enum TaskStatusType {
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatusType {
    pub fn into_model(self) -> TaskStatus {
        match self {
            TaskStatusType::Todo => TaskStatus::Todo,
            TaskStatusType::InProgress => TaskStatus::InProgress,
            TaskStatusType::Done => TaskStatus::Done,
            TaskStatusType::Blocked => TaskStatus::Blocked,
        }
    }

    pub fn from_stored(s: &str) -> Result<Self> {
        match TaskStatus::parse(s) {
            Some(TaskStatus::Todo) => Ok(TaskStatusType::Todo),
            Some(TaskStatus::InProgress) => Ok(TaskStatusType::InProgress),
            Some(TaskStatus::Done) => Ok(TaskStatusType::Done),
            Some(TaskStatus::Blocked) => Ok(TaskStatusType::Blocked),
            None => Err(format!("unknown task status: {s}").into()),
        }
    }
}

/// Task priority
#[derive(Debug, Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "TaskPriority")]
pub enum TaskPriorityType {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriorityType {
    pub fn into_model(self) -> TaskPriority {
        match self {
            TaskPriorityType::Low => TaskPriority::Low,
            TaskPriorityType::Medium => TaskPriority::Medium,
            TaskPriorityType::High => TaskPriority::High,
            TaskPriorityType::Urgent => TaskPriority::Urgent,
        }
    }

    pub fn from_stored(s: &str) -> Result<Self> {
        match TaskPriority::parse(s) {
            Some(TaskPriority::Low) => Ok(TaskPriorityType::Low),
            Some(TaskPriority::Medium) => Ok(TaskPriorityType::Medium),
            Some(TaskPriority::High) => Ok(TaskPriorityType::High),
            Some(TaskPriority::Urgent) => Ok(TaskPriorityType::Urgent),
            None => Err(format!("unknown task priority: {s}").into()),
        }
    }
}

/// Organization GraphQL type
pub struct OrganizationType(pub Organization);

#[Object(name = "Organization")]
impl OrganizationType {
    async fn id(&self) -> ID {
        ID::from(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn slug(&self) -> &str {
        &self.0.slug
    }

    async fn contact_email(&self) -> &str {
        &self.0.contact_email
    }

    async fn is_active(&self) -> bool {
        self.0.is_active
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    /// Number of projects owned by this organization
    async fn project_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let pool = ctx.data::<PgPool>()?;
        Ok(Organization::project_count(pool, self.0.id).await?)
    }

    /// Number of tasks across all of this organization's projects
    async fn task_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let pool = ctx.data::<PgPool>()?;
        Ok(Organization::task_count(pool, self.0.id).await?)
    }
}

/// Project GraphQL type
pub struct ProjectType(pub Project);

#[Object(name = "Project")]
impl ProjectType {
    async fn id(&self) -> ID {
        ID::from(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn status(&self) -> Result<ProjectStatusType> {
        ProjectStatusType::from_stored(&self.0.status)
    }

    async fn due_date(&self) -> Option<NaiveDate> {
        self.0.due_date
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    /// Owning organization
    async fn organization(&self, ctx: &Context<'_>) -> Result<Option<OrganizationType>> {
        let pool = ctx.data::<PgPool>()?;
        let organization = Organization::find_by_id(pool, self.0.organization_id).await?;
        Ok(organization.map(OrganizationType))
    }

    /// Number of tasks in this project
    async fn task_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let pool = ctx.data::<PgPool>()?;
        let (total, _) = Project::task_counts(pool, self.0.id).await?;
        Ok(total)
    }

    /// Number of tasks with status DONE
    async fn completed_tasks(&self, ctx: &Context<'_>) -> Result<i64> {
        let pool = ctx.data::<PgPool>()?;
        let (_, completed) = Project::task_counts(pool, self.0.id).await?;
        Ok(completed)
    }

    /// Percentage of tasks done, rounded to 2 decimals; 0 with no tasks
    async fn completion_rate(&self, ctx: &Context<'_>) -> Result<f64> {
        let pool = ctx.data::<PgPool>()?;
        let (total, completed) = Project::task_counts(pool, self.0.id).await?;
        Ok(completion_rate(total, completed))
    }

    /// Whether the due date has passed and the project is not completed
    async fn is_overdue(&self) -> bool {
        project_is_overdue(self.0.due_date, &self.0.status, Utc::now().date_naive())
    }
}

/// Task GraphQL type
pub struct TaskType(pub Task);

#[Object(name = "Task")]
impl TaskType {
    async fn id(&self) -> ID {
        ID::from(self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn status(&self) -> Result<TaskStatusType> {
        TaskStatusType::from_stored(&self.0.status)
    }

    async fn priority(&self) -> Result<TaskPriorityType> {
        TaskPriorityType::from_stored(&self.0.priority)
    }

    async fn assignee_email(&self) -> &str {
        &self.0.assignee_email
    }

    async fn due_date(&self) -> Option<DateTime<Utc>> {
        self.0.due_date
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    /// Owning project, within the requesting tenant
    async fn project(&self, ctx: &Context<'_>) -> Result<Option<ProjectType>> {
        let pool = ctx.data::<PgPool>()?;
        let tenant = ctx.data::<TenantContext>()?;
        let Some(organization) = tenant.organization() else {
            return Ok(None);
        };
        let project =
            Project::find_for_organization(pool, self.0.project_id, organization.id).await?;
        Ok(project.map(ProjectType))
    }

    /// Whether the due datetime has passed and the task is not done
    async fn is_overdue(&self) -> bool {
        task_is_overdue(self.0.due_date, &self.0.status, Utc::now())
    }

    /// Number of comments on this task
    async fn comment_count(&self, ctx: &Context<'_>) -> Result<i64> {
        let pool = ctx.data::<PgPool>()?;
        Ok(Task::comment_count(pool, self.0.id).await?)
    }
}

/// Task comment GraphQL type
pub struct TaskCommentType(pub TaskComment);

#[Object(name = "TaskComment")]
impl TaskCommentType {
    async fn id(&self) -> ID {
        ID::from(self.0.id)
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn author_email(&self) -> &str {
        &self.0.author_email
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    /// Task this comment is on, within the requesting tenant
    async fn task(&self, ctx: &Context<'_>) -> Result<Option<TaskType>> {
        let pool = ctx.data::<PgPool>()?;
        let tenant = ctx.data::<TenantContext>()?;
        let Some(organization) = tenant.organization() else {
            return Ok(None);
        };
        let task = Task::find_for_organization(pool, self.0.task_id, organization.id).await?;
        Ok(task.map(TaskType))
    }
}

/// Per-tenant aggregate statistics
pub struct ProjectStatsType(pub TenantStats);

#[Object(name = "ProjectStats")]
impl ProjectStatsType {
    async fn total_projects(&self) -> i64 {
        self.0.total_projects
    }

    async fn active_projects(&self) -> i64 {
        self.0.active_projects
    }

    async fn completed_projects(&self) -> i64 {
        self.0.completed_projects
    }

    async fn total_tasks(&self) -> i64 {
        self.0.total_tasks
    }

    async fn completed_tasks(&self) -> i64 {
        self.0.completed_tasks
    }

    async fn completion_rate(&self) -> f64 {
        self.0.completion_rate
    }
}

/// Mutation payload carrying an organization
#[derive(SimpleObject)]
pub struct OrganizationPayload {
    pub organization: Option<OrganizationType>,
    pub success: bool,
    pub errors: Vec<String>,
}

/// Mutation payload carrying a project
#[derive(SimpleObject)]
pub struct ProjectPayload {
    pub project: Option<ProjectType>,
    pub success: bool,
    pub errors: Vec<String>,
}

/// Mutation payload carrying a task
#[derive(SimpleObject)]
pub struct TaskPayload {
    pub task: Option<TaskType>,
    pub success: bool,
    pub errors: Vec<String>,
}

/// Mutation payload carrying a comment
#[derive(SimpleObject)]
pub struct CommentPayload {
    pub comment: Option<TaskCommentType>,
    pub success: bool,
    pub errors: Vec<String>,
}

/// Mutation payload for deletions
#[derive(SimpleObject)]
pub struct DeletePayload {
    pub success: bool,
    pub errors: Vec<String>,
}

impl OrganizationPayload {
    pub fn ok(organization: Organization) -> Self {
        Self {
            organization: Some(OrganizationType(organization)),
            success: true,
            errors: vec![],
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            organization: None,
            success: false,
            errors: vec![message.into()],
        }
    }
}

impl ProjectPayload {
    pub fn ok(project: Project) -> Self {
        Self {
            project: Some(ProjectType(project)),
            success: true,
            errors: vec![],
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            project: None,
            success: false,
            errors: vec![message.into()],
        }
    }
}

impl TaskPayload {
    pub fn ok(task: Task) -> Self {
        Self {
            task: Some(TaskType(task)),
            success: true,
            errors: vec![],
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            task: None,
            success: false,
            errors: vec![message.into()],
        }
    }
}

impl CommentPayload {
    pub fn ok(comment: TaskComment) -> Self {
        Self {
            comment: Some(TaskCommentType(comment)),
            success: true,
            errors: vec![],
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            comment: None,
            success: false,
            errors: vec![message.into()],
        }
    }
}

impl DeletePayload {
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: vec![],
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![message.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_from_stored() {
        assert_eq!(
            ProjectStatusType::from_stored("ON_HOLD").unwrap(),
            ProjectStatusType::OnHold
        );
        assert!(ProjectStatusType::from_stored("bogus").is_err());
    }

    #[test]
    fn test_task_enums_round_trip_through_model() {
        assert_eq!(
            TaskStatusType::from_stored(TaskStatusType::InProgress.into_model().as_str()).unwrap(),
            TaskStatusType::InProgress
        );
        assert_eq!(
            TaskPriorityType::from_stored(TaskPriorityType::Urgent.into_model().as_str()).unwrap(),
            TaskPriorityType::Urgent
        );
    }

    #[test]
    fn test_delete_payload_shapes() {
        let ok = DeletePayload::ok();
        assert!(ok.success);
        assert!(ok.errors.is_empty());

        let err = DeletePayload::err("Project not found");
        assert!(!err.success);
        assert_eq!(err.errors, vec!["Project not found".to_string()]);
    }
}
