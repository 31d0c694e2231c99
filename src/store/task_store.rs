use crate::{
    domain::{
        column::ColumnId,
        filter,
        task::{Attachment, Priority, Task, TaskId},
    },
    error::{Result, TaskboardError},
    storage::{CollectionKey, Storage},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Fields for creating a task. Everything beyond the title is optional and
/// falls back to the standard defaults (todo column, medium priority).
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub labels: Vec<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: ColumnId) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }
}

/// Partial update for a task; `Some` fields replace, `None` fields are left
/// untouched (shallow merge)
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub labels: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn status(status: ColumnId) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Owner of the task collections and the task lifecycle.
///
/// Holds the active and the trashed collection as two disjoint sets, each
/// persisted as a whole snapshot under its own collection key. Mutations are
/// applied in memory first (all-or-nothing) and then persisted; a persistence
/// failure surfaces to the caller without rolling the in-memory state back,
/// since the next successful save reconciles it. Mutations take `&mut self`,
/// so a caller must await one operation before issuing the next against the
/// same store, which keeps at most one write per collection in flight.
pub struct TaskStore {
    tasks: Vec<Task>,
    deleted: Vec<Task>,
    storage: Arc<dyn Storage>,
}

impl TaskStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            tasks: Vec::new(),
            deleted: Vec::new(),
            storage,
        }
    }

    /// Loads both collections from storage; a missing collection reads as
    /// empty
    pub async fn load(&mut self) -> Result<()> {
        self.tasks = load_collection(self.storage.as_ref(), CollectionKey::Tasks).await?;
        self.deleted = load_collection(self.storage.as_ref(), CollectionKey::DeletedTasks).await?;
        tracing::info!(
            active = self.tasks.len(),
            deleted = self.deleted.len(),
            "task collections loaded"
        );
        Ok(())
    }

    /// Read-only snapshot of the active collection
    pub fn active_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Read-only snapshot of the trash
    pub fn deleted_tasks(&self) -> &[Task] {
        &self.deleted
    }

    /// Looks up an active task by id
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// All labels in use across the active collection, first-seen order
    pub fn available_labels(&self) -> Vec<String> {
        filter::available_labels(&self.tasks)
    }

    /// Creates a task with a fresh id and the standard defaults
    pub async fn create_task(&mut self, new: NewTask) -> Result<Task> {
        if new.title.trim().is_empty() {
            return Err(TaskboardError::Validation(
                "task title cannot be empty".to_string(),
            ));
        }

        let mut task = Task::new(new.title);
        task.description = new.description;
        task.due_date = new.due_date;
        if let Some(priority) = new.priority {
            task.priority = priority;
        }
        if let Some(status) = new.status {
            task.set_status(status);
        }
        for label in new.labels {
            task.add_label(label);
        }

        tracing::debug!(task = %task.id, "task created");
        self.tasks.push(task.clone());
        self.persist_active().await?;
        Ok(task)
    }

    /// Applies a shallow partial update. A status change into the completed
    /// column stamps `completed_at`; a change away from it clears the stamp.
    pub async fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Result<Task> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(TaskboardError::Validation(
                    "task title cannot be empty".to_string(),
                ));
            }
        }

        let task = self.get_mut(id)?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(labels) = patch.labels {
            task.labels.clear();
            for label in labels {
                task.add_label(label);
            }
        }
        if let Some(status) = patch.status {
            task.set_status(status);
        }

        let updated = task.clone();
        tracing::debug!(task = %id, "task updated");
        self.persist_active().await?;
        Ok(updated)
    }

    /// Shorthand for moving a task into the completed column
    pub async fn complete_task(&mut self, id: &TaskId) -> Result<Task> {
        self.update_task(id, TaskPatch::status(ColumnId::completed()))
            .await
    }

    /// Moves a task from the active collection to the trash, stamping
    /// `deleted_at`
    pub async fn soft_delete_task(&mut self, id: &TaskId) -> Result<()> {
        let pos = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TaskboardError::TaskNotFound(id.to_string()))?;

        let mut task = self.tasks.remove(pos);
        task.deleted_at = Some(Utc::now());
        self.deleted.push(task);

        tracing::debug!(task = %id, "task moved to trash");
        self.persist_active().await?;
        self.persist_deleted().await?;
        Ok(())
    }

    /// Moves a task back out of the trash, clearing `deleted_at` and
    /// preserving everything else including the id
    pub async fn restore_task(&mut self, id: &TaskId) -> Result<Task> {
        let pos = self
            .deleted
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TaskboardError::TaskNotFound(id.to_string()))?;

        let mut task = self.deleted.remove(pos);
        task.deleted_at = None;
        self.tasks.push(task.clone());

        tracing::debug!(task = %id, "task restored from trash");
        self.persist_active().await?;
        self.persist_deleted().await?;
        Ok(task)
    }

    /// Removes a task from the trash irrecoverably
    pub async fn permanently_delete_task(&mut self, id: &TaskId) -> Result<()> {
        let pos = self
            .deleted
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TaskboardError::TaskNotFound(id.to_string()))?;

        self.deleted.remove(pos);
        tracing::debug!(task = %id, "task permanently deleted");
        self.persist_deleted().await?;
        Ok(())
    }

    /// Adds a label to a task; an already-present label is a no-op and does
    /// not persist
    pub async fn add_label(&mut self, id: &TaskId, label: String) -> Result<()> {
        let task = self.get_mut(id)?;
        if task.labels.contains(&label) {
            return Ok(());
        }
        task.add_label(label);
        self.persist_active().await
    }

    /// Removes a label from a task
    pub async fn remove_label(&mut self, id: &TaskId, label: &str) -> Result<()> {
        let task = self.get_mut(id)?;
        task.remove_label(label);
        self.persist_active().await
    }

    /// Appends a comment to a task and returns the generated comment id
    pub async fn add_comment(
        &mut self,
        id: &TaskId,
        text: String,
        attachments: Vec<Attachment>,
    ) -> Result<String> {
        let task = self.get_mut(id)?;
        let comment_id = task.add_comment(text, attachments);
        self.persist_active().await?;
        Ok(comment_id)
    }

    /// Removes a comment from a task
    pub async fn remove_comment(&mut self, id: &TaskId, comment_id: &str) -> Result<()> {
        let task = self.get_mut(id)?;
        task.remove_comment(comment_id)?;
        self.persist_active().await
    }

    fn get_mut(&mut self, id: &TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TaskboardError::TaskNotFound(id.to_string()))
    }

    async fn persist_active(&self) -> Result<()> {
        self.storage
            .set(CollectionKey::Tasks, to_records(&self.tasks)?)
            .await
    }

    async fn persist_deleted(&self) -> Result<()> {
        self.storage
            .set(CollectionKey::DeletedTasks, to_records(&self.deleted)?)
            .await
    }
}

pub(crate) async fn load_collection<T: serde::de::DeserializeOwned>(
    storage: &dyn Storage,
    key: CollectionKey,
) -> Result<Vec<T>> {
    let records = storage.get(key).await?.unwrap_or_default();
    records
        .into_iter()
        .map(|record| serde_json::from_value(record).map_err(Into::into))
        .collect()
}

pub(crate) fn to_records<T: Serialize>(items: &[T]) -> Result<Vec<Value>> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}
