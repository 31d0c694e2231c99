//! # Taskboard Core
//!
//! Core business logic and domain models for a desktop kanban task manager.
//!
//! This crate provides the task/status-column data model, the soft-delete
//! (trash) lifecycle, multi-criteria filtering, board reporting, and the
//! drag-and-drop status reassignment flow, without any dependency on a
//! specific UI toolkit or storage backend. Hosts plug in persistence through
//! the [`storage::Storage`] port, which reads and writes the three JSON
//! collections (`tasks`, `deletedTasks`, `statusColumns`) as whole snapshots.

pub mod domain;
pub mod drag;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use domain::{
    column::{ColumnId, StatusColumn},
    filter::{filter_tasks, FilterCriteria, TimeWindow},
    report::{aggregate, ReportSummary},
    task::{Attachment, Comment, Priority, Task, TaskId},
};
pub use drag::{DragController, DragState, DropOutcome};
pub use error::{ErrorKind, Result, TaskboardError};
pub use storage::{CollectionKey, Storage};
pub use store::{ColumnPatch, ColumnRegistry, NewTask, TaskPatch, TaskStore};
