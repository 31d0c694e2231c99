pub mod column_registry;
pub mod task_store;

pub use column_registry::{ColumnPatch, ColumnRegistry};
pub use task_store::{NewTask, TaskPatch, TaskStore};
