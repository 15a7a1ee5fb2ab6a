use crate::{
    api::TaskApi,
    domain::task::{NewTask, Project, Task, TaskUpdate},
    error::{Result, TaskboardError},
};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    next_project_id: u64,
    next_task_id: u64,
}

/// In-process implementation of [`TaskApi`] guarded by a single token
#[derive(Debug)]
pub struct MemoryTaskApi {
    token: String,
    state: RwLock<State>,
}

impl MemoryTaskApi {
    /// Creates an empty service that accepts only `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            state: RwLock::new(State {
                next_project_id: 1,
                next_task_id: 1,
                ..State::default()
            }),
        }
    }

    /// Registers a project directly, bypassing authentication
    pub async fn add_project(&self, title: impl Into<String>) -> Project {
        let mut state = self.state.write().await;
        let project = Project {
            id: state.next_project_id,
            title: title.into(),
            status: None,
            due_date: None,
        };
        state.next_project_id += 1;
        state.projects.push(project.clone());
        project
    }

    fn authorize(&self, token: &str) -> Result<()> {
        if token != self.token {
            tracing::warn!("rejected request with invalid token");
            return Err(TaskboardError::Unauthorized);
        }
        Ok(())
    }
}

#[async_trait]
impl TaskApi for MemoryTaskApi {
    async fn list_projects(&self, token: &str) -> Result<Vec<Project>> {
        self.authorize(token)?;
        Ok(self.state.read().await.projects.clone())
    }

    async fn delete_project(&self, token: &str, id: u64) -> Result<()> {
        self.authorize(token)?;
        let mut state = self.state.write().await;

        let pos = state
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(TaskboardError::ProjectNotFound(id))?;
        state.projects.remove(pos);
        state.tasks.retain(|t| t.project_id != id);
        Ok(())
    }

    async fn list_tasks(&self, token: &str) -> Result<Vec<Task>> {
        self.authorize(token)?;
        Ok(self.state.read().await.tasks.clone())
    }

    async fn create_task(&self, token: &str, task: &NewTask) -> Result<Task> {
        self.authorize(token)?;
        task.validate()?;
        let mut state = self.state.write().await;

        if !state.projects.iter().any(|p| p.id == task.project_id) {
            return Err(TaskboardError::ProjectNotFound(task.project_id));
        }

        let mut created = Task {
            id: state.next_task_id,
            title: task.title.clone(),
            description: None,
            status: task.status,
            due_date: None,
            project_id: task.project_id,
        };
        created.apply(&TaskUpdate {
            title: Some(task.title.clone()),
            description: task.description.clone(),
            status: Some(task.status),
            due_date: task.due_date,
            project_id: task.project_id,
        });
        state.next_task_id += 1;
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, token: &str, id: u64, update: &TaskUpdate) -> Result<Task> {
        self.authorize(token)?;
        update.validate()?;
        let mut state = self.state.write().await;

        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskboardError::TaskNotFound(id))?;
        task.apply(update);
        Ok(task.clone())
    }

    async fn delete_task(&self, token: &str, id: u64) -> Result<()> {
        self.authorize(token)?;
        let mut state = self.state.write().await;

        let pos = state
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskboardError::TaskNotFound(id))?;
        state.tasks.remove(pos);
        Ok(())
    }
}
