use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Not logged in: no session token available")]
    NotAuthenticated,

    #[error("Session expired. Please log in again.")]
    Unauthorized,

    #[error("Project not found: {0}")]
    ProjectNotFound(u64),

    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),
}
