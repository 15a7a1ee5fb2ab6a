pub mod board;
pub mod drag;
pub mod ids;
pub mod task;

pub use board::{Board, BoardManager, BoardObserver, Group, Item};
pub use drag::DragEnd;
pub use ids::{GroupId, IdGenerator, ItemId};
pub use task::{
    group_tasks_by_title, preview_description, NewTask, Project, Task, TaskGroup, TaskStatus,
    TaskUpdate,
};
