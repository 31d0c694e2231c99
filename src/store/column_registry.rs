use crate::{
    domain::{
        column::{ColumnId, StatusColumn},
        task::Task,
    },
    error::{Result, TaskboardError},
    storage::{CollectionKey, Storage},
    store::task_store::{load_collection, to_records},
};
use std::sync::Arc;

/// Partial update for a non-built-in column
#[derive(Debug, Clone, Default)]
pub struct ColumnPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Owner of the workflow stages (status columns).
///
/// The three built-in columns are always present: the registry starts with
/// them and re-adds any that a persisted snapshot is missing. Built-ins can
/// never be edited or deleted, and a custom column cannot be deleted while a
/// task still references it.
pub struct ColumnRegistry {
    columns: Vec<StatusColumn>,
    storage: Arc<dyn Storage>,
}

impl ColumnRegistry {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            columns: StatusColumn::builtin_columns(),
            storage,
        }
    }

    /// Loads the persisted column set, self-healing missing built-ins.
    /// A healed or freshly seeded set is written back immediately.
    pub async fn load(&mut self) -> Result<()> {
        let stored: Vec<StatusColumn> =
            load_collection(self.storage.as_ref(), CollectionKey::StatusColumns).await?;

        if stored.is_empty() {
            self.columns = StatusColumn::builtin_columns();
            self.persist().await?;
            tracing::info!("status columns seeded with built-ins");
            return Ok(());
        }

        let mut columns = stored;
        let mut healed = false;
        for builtin in StatusColumn::builtin_columns() {
            if !columns.iter().any(|c| c.id == builtin.id) {
                tracing::warn!(column = %builtin.id, "built-in column missing, re-adding");
                columns.push(builtin);
                healed = true;
            }
        }

        self.columns = columns;
        if healed {
            self.persist().await?;
        }
        tracing::info!(columns = self.columns.len(), "status columns loaded");
        Ok(())
    }

    /// Ordered column set, built-ins guaranteed present
    pub fn columns(&self) -> &[StatusColumn] {
        &self.columns
    }

    /// The user-editable (non-built-in) columns
    pub fn custom_columns(&self) -> Vec<&StatusColumn> {
        self.columns.iter().filter(|c| !c.is_builtin()).collect()
    }

    pub fn contains(&self, id: &ColumnId) -> bool {
        self.columns.iter().any(|c| &c.id == id)
    }

    pub fn get(&self, id: &ColumnId) -> Option<&StatusColumn> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Adds a user-defined column. The id is derived from the name when no
    /// explicit id is supplied; either way it is normalized to lowercase
    /// hyphenated form and must not collide with any existing column.
    pub async fn add_column(
        &mut self,
        name: &str,
        icon: Option<String>,
        color: Option<String>,
        explicit_id: Option<&str>,
    ) -> Result<StatusColumn> {
        if name.trim().is_empty() {
            return Err(TaskboardError::Validation(
                "column name cannot be empty".to_string(),
            ));
        }

        let id = ColumnId::from_name(explicit_id.unwrap_or(name));
        if id.as_str().is_empty() {
            return Err(TaskboardError::Validation(
                "column id cannot be empty".to_string(),
            ));
        }
        if self.contains(&id) {
            return Err(TaskboardError::Conflict(format!(
                "column id '{}' already exists",
                id
            )));
        }

        let column = StatusColumn::new(id, name.trim().to_string(), icon, color);
        tracing::debug!(column = %column.id, "status column added");
        self.columns.push(column.clone());
        self.persist().await?;
        Ok(column)
    }

    /// Updates the name, icon, or color of a non-built-in column
    pub async fn update_column(&mut self, id: &ColumnId, patch: ColumnPatch) -> Result<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(TaskboardError::Validation(
                    "column name cannot be empty".to_string(),
                ));
            }
        }

        let column = self
            .columns
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| TaskboardError::ColumnNotFound(id.to_string()))?;
        if column.is_builtin() {
            return Err(TaskboardError::Forbidden(format!(
                "built-in column '{}' cannot be modified",
                id
            )));
        }

        if let Some(name) = patch.name {
            column.name = name.trim().to_string();
        }
        if let Some(icon) = patch.icon {
            column.icon = icon;
        }
        if let Some(color) = patch.color {
            column.color = color;
        }

        tracing::debug!(column = %id, "status column updated");
        self.persist().await
    }

    /// Deletes a non-built-in column. Occupancy is judged against the active
    /// task collection the caller passes in; deletion is rejected while any
    /// task still has this column as its status.
    pub async fn delete_column(&mut self, id: &ColumnId, active_tasks: &[Task]) -> Result<()> {
        let pos = self
            .columns
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| TaskboardError::ColumnNotFound(id.to_string()))?;
        if self.columns[pos].is_builtin() {
            return Err(TaskboardError::Forbidden(format!(
                "built-in column '{}' cannot be deleted",
                id
            )));
        }

        let occupied = active_tasks.iter().filter(|t| &t.status == id).count();
        if occupied > 0 {
            return Err(TaskboardError::Conflict(format!(
                "column '{}' still holds {} task(s); move them first",
                id, occupied
            )));
        }

        self.columns.remove(pos);
        tracing::debug!(column = %id, "status column deleted");
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        self.storage
            .set(CollectionKey::StatusColumns, to_records(&self.columns)?)
            .await
    }
}
