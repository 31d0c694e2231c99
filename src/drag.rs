//! Drag-and-drop status reassignment, decoupled from any input toolkit.
//!
//! A drag gesture is modeled as an explicit state machine:
//! `Idle -> Dragging -> (drop | cancel) -> Idle`. Only one gesture can be
//! active at a time; starting a second one is rejected and the earlier drag
//! stays authoritative.

use crate::{
    domain::{
        column::{ColumnId, StatusColumn},
        task::{Task, TaskId},
    },
    error::{Result, TaskboardError},
    store::{ColumnRegistry, TaskPatch, TaskStore},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        task_id: TaskId,
        source_column: ColumnId,
    },
}

/// What a completed drop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task moved to the target column
    Moved,
    /// No mutation: the target was the task's current column, an unknown
    /// column, or the task no longer exists
    NoChange,
}

pub struct DragController {
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begins a drag gesture. Fails while another gesture is active.
    pub fn start(&mut self, task_id: TaskId, source_column: ColumnId) -> Result<()> {
        if self.is_dragging() {
            return Err(TaskboardError::Conflict(
                "a drag gesture is already in progress".to_string(),
            ));
        }
        self.state = DragState::Dragging {
            task_id,
            source_column,
        };
        Ok(())
    }

    /// Abandons the active gesture without mutating anything
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Completes the active gesture over `target`. Reassigns the task's
    /// status through the task store when the target is a known column that
    /// differs from the task's current status; otherwise nothing mutates.
    /// The controller returns to `Idle` either way, including on a failed
    /// status update.
    pub async fn drop_on(
        &mut self,
        target: &ColumnId,
        tasks: &mut TaskStore,
        columns: &ColumnRegistry,
    ) -> Result<DropOutcome> {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        let task_id = match state {
            DragState::Dragging { task_id, .. } => task_id,
            DragState::Idle => {
                return Err(TaskboardError::Validation(
                    "no drag gesture in progress".to_string(),
                ))
            }
        };

        if !columns.contains(target) {
            tracing::debug!(target = %target, "drop on unknown column ignored");
            return Ok(DropOutcome::NoChange);
        }

        let current_status = match tasks.get(&task_id) {
            Some(task) => task.status.clone(),
            // Deleted out from under the gesture
            None => return Ok(DropOutcome::NoChange),
        };
        if &current_status == target {
            return Ok(DropOutcome::NoChange);
        }

        tasks
            .update_task(&task_id, TaskPatch::status(target.clone()))
            .await?;
        tracing::debug!(task = %task_id, from = %current_status, to = %target, "task reassigned by drag");
        Ok(DropOutcome::Moved)
    }
}

/// Groups tasks into board columns, preserving column order and task input
/// order. Tasks whose status matches no column are omitted.
pub fn group_by_column<'c, 't>(
    columns: &'c [StatusColumn],
    tasks: &'t [Task],
) -> Vec<(&'c StatusColumn, Vec<&'t Task>)> {
    columns
        .iter()
        .map(|column| {
            let in_column = tasks.iter().filter(|t| t.status == column.id).collect();
            (column, in_column)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::storage::memory::MemoryStorage;
    use crate::store::NewTask;
    use std::sync::Arc;

    async fn board() -> (TaskStore, ColumnRegistry) {
        let storage = Arc::new(MemoryStorage::new());
        (
            TaskStore::new(storage.clone()),
            ColumnRegistry::new(storage),
        )
    }

    #[tokio::test]
    async fn test_drop_moves_task_to_target_column() {
        let (mut tasks, columns) = board().await;
        let task = tasks.create_task(NewTask::new("a")).await.unwrap();

        let mut drag = DragController::new();
        drag.start(task.id.clone(), task.status.clone()).unwrap();
        assert!(drag.is_dragging());

        let outcome = drag
            .drop_on(&ColumnId::in_progress(), &mut tasks, &columns)
            .await
            .unwrap();
        assert_eq!(outcome, DropOutcome::Moved);
        assert!(!drag.is_dragging());

        let moved = tasks.get(&task.id).unwrap();
        assert_eq!(moved.status, ColumnId::in_progress());
        assert!(moved.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_drop_on_current_column_is_a_no_op() {
        let (mut tasks, columns) = board().await;
        let task = tasks.create_task(NewTask::new("a")).await.unwrap();

        let mut drag = DragController::new();
        drag.start(task.id.clone(), task.status.clone()).unwrap();
        let outcome = drag
            .drop_on(&ColumnId::todo(), &mut tasks, &columns)
            .await
            .unwrap();

        assert_eq!(outcome, DropOutcome::NoChange);
        assert_eq!(tasks.get(&task.id).unwrap(), &task);
    }

    #[tokio::test]
    async fn test_drop_on_unknown_column_is_a_no_op() {
        let (mut tasks, columns) = board().await;
        let task = tasks.create_task(NewTask::new("a")).await.unwrap();

        let mut drag = DragController::new();
        drag.start(task.id.clone(), task.status.clone()).unwrap();
        let outcome = drag
            .drop_on(&ColumnId::from_name("ghost"), &mut tasks, &columns)
            .await
            .unwrap();

        assert_eq!(outcome, DropOutcome::NoChange);
        assert!(!drag.is_dragging());
        assert_eq!(tasks.get(&task.id).unwrap().status, ColumnId::todo());
    }

    #[tokio::test]
    async fn test_drop_into_completed_stamps_completion() {
        let (mut tasks, columns) = board().await;
        let task = tasks.create_task(NewTask::new("a")).await.unwrap();

        let mut drag = DragController::new();
        drag.start(task.id.clone(), task.status.clone()).unwrap();
        drag.drop_on(&ColumnId::completed(), &mut tasks, &columns)
            .await
            .unwrap();

        assert!(tasks.get(&task.id).unwrap().completed_at.is_some());
    }

    #[tokio::test]
    async fn test_second_drag_start_is_rejected() {
        let (mut tasks, columns) = board().await;
        let a = tasks.create_task(NewTask::new("a")).await.unwrap();
        let b = tasks.create_task(NewTask::new("b")).await.unwrap();

        let mut drag = DragController::new();
        drag.start(a.id.clone(), a.status.clone()).unwrap();

        let err = drag.start(b.id.clone(), b.status.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // The earlier drag stays authoritative
        let outcome = drag
            .drop_on(&ColumnId::in_progress(), &mut tasks, &columns)
            .await
            .unwrap();
        assert_eq!(outcome, DropOutcome::Moved);
        assert_eq!(tasks.get(&a.id).unwrap().status, ColumnId::in_progress());
        assert_eq!(tasks.get(&b.id).unwrap().status, ColumnId::todo());
    }

    #[tokio::test]
    async fn test_cancel_returns_to_idle_without_mutation() {
        let (mut tasks, _) = board().await;
        let task = tasks.create_task(NewTask::new("a")).await.unwrap();

        let mut drag = DragController::new();
        drag.start(task.id.clone(), task.status.clone()).unwrap();
        drag.cancel();

        assert!(!drag.is_dragging());
        assert_eq!(tasks.get(&task.id).unwrap(), &task);
        // A new gesture can start after cancel
        assert!(drag.start(task.id.clone(), task.status.clone()).is_ok());
    }

    #[tokio::test]
    async fn test_drop_without_active_drag_fails() {
        let (mut tasks, columns) = board().await;
        let mut drag = DragController::new();

        let err = drag
            .drop_on(&ColumnId::todo(), &mut tasks, &columns)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_drop_after_task_deleted_is_a_no_op() {
        let (mut tasks, columns) = board().await;
        let task = tasks.create_task(NewTask::new("a")).await.unwrap();

        let mut drag = DragController::new();
        drag.start(task.id.clone(), task.status.clone()).unwrap();
        tasks.soft_delete_task(&task.id).await.unwrap();

        let outcome = drag
            .drop_on(&ColumnId::in_progress(), &mut tasks, &columns)
            .await
            .unwrap();
        assert_eq!(outcome, DropOutcome::NoChange);
    }

    #[tokio::test]
    async fn test_group_by_column() {
        let (mut tasks, columns) = board().await;
        let a = tasks.create_task(NewTask::new("a")).await.unwrap();
        tasks.create_task(NewTask::new("b")).await.unwrap();
        tasks
            .update_task(&a.id, TaskPatch::status(ColumnId::in_progress()))
            .await
            .unwrap();

        let groups = group_by_column(columns.columns(), tasks.active_tasks());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0.id, ColumnId::todo());
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[0].1[0].title, "b");
        assert_eq!(groups[1].1.len(), 1);
        assert_eq!(groups[1].1[0].title, "a");
        assert!(groups[2].1.is_empty());
    }
}
