use crate::{
    domain::task::{group_tasks_by_title, NewTask, Project, Task, TaskGroup, TaskUpdate},
    error::Result,
    session::Session,
};
use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryTaskApi;

/// Remote project/task service.
///
/// Every call carries the caller's bearer token. A rejected token is
/// reported as `TaskboardError::Unauthorized`.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists the projects visible to the token's owner
    async fn list_projects(&self, token: &str) -> Result<Vec<Project>>;

    /// Deletes a project
    async fn delete_project(&self, token: &str, id: u64) -> Result<()>;

    /// Lists all tasks visible to the token's owner, across projects
    async fn list_tasks(&self, token: &str) -> Result<Vec<Task>>;

    /// Creates a task and returns the stored record
    async fn create_task(&self, token: &str, task: &NewTask) -> Result<Task>;

    /// Updates a task and returns the stored record
    async fn update_task(&self, token: &str, id: u64, update: &TaskUpdate) -> Result<Task>;

    /// Deletes a task
    async fn delete_task(&self, token: &str, id: u64) -> Result<()>;
}

/// Loads the tasks of one project grouped into board columns by title
pub async fn fetch_project_board(
    api: &dyn TaskApi,
    session: &Session,
    project_id: u64,
) -> Result<Vec<TaskGroup>> {
    let token = session.token()?;
    let tasks = api.list_tasks(token).await?;
    let groups = group_tasks_by_title(&tasks, project_id);
    tracing::debug!(project_id, groups = groups.len(), "loaded project board");
    Ok(groups)
}

/// Validates and submits a task edit
pub async fn submit_task_update(
    api: &dyn TaskApi,
    session: &Session,
    id: u64,
    update: &TaskUpdate,
) -> Result<Task> {
    update.validate()?;
    let token = session.token()?;
    api.update_task(token, id, update).await
}
