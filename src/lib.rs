//! # Taskboard Core
//!
//! Board state and task shaping for a project/task kanban board.
//!
//! The [`BoardManager`] holds an in-memory card board (ordered columns of
//! ordered cards) and applies edits and drag-and-drop moves to it. The
//! [`api`] module describes the remote project/task service the surrounding
//! screens talk to, without committing to any transport.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use api::{fetch_project_board, submit_task_update, MemoryTaskApi, TaskApi};
pub use config::{load_config, BoardConfig};
pub use domain::{
    board::{Board, BoardManager, BoardObserver, Group, Item},
    drag::DragEnd,
    ids::{GroupId, ItemId},
    task::{Project, Task, TaskGroup, TaskStatus, TaskUpdate},
};
pub use error::{Result, TaskboardError};
pub use session::{SeedItem, SelectedProject, Session};
