use crate::domain::column::ColumnId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a task (a UUIDv4 string, generated at creation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh, never-reused task ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = crate::error::TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Err(crate::error::TaskboardError::Validation(
                "task id cannot be empty".to_string(),
            ))
        } else {
            Ok(Self(s.to_string()))
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid priorities: low, medium, high",
                s
            )),
        }
    }
}

/// Opaque presentation payload attached to a comment (image, file, recording)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Attachment {
    pub fn new(url: String, name: String, kind: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            name,
            kind,
            created_at: Some(Utc::now()),
        }
    }
}

/// A comment on a task. Comments are append/remove only and never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Comment {
    pub fn new(text: String, attachments: Vec<Attachment>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            created_at: Utc::now(),
            attachments,
        }
    }
}

/// A task on the board.
///
/// Serialized in the camelCase JSON shape the desktop application persists,
/// with optional fields omitted so records written by older versions load
/// cleanly. `deleted_at` is present only while the task sits in the trash
/// collection; it is the sole discriminator between the active and deleted
/// collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ColumnId,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in the initial column with default priority
    pub fn new(title: String) -> Self {
        Self {
            id: TaskId::new(),
            title,
            description: None,
            status: ColumnId::todo(),
            priority: Priority::default(),
            due_date: None,
            labels: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
            comments: Vec::new(),
            deleted_at: None,
        }
    }

    /// Sets the description
    pub fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    /// Moves the task to a new status column, stamping `completed_at` on
    /// entry into the terminal column and clearing it on exit.
    pub fn set_status(&mut self, status: ColumnId) {
        let was_completed = self.status.is_completed();
        let now_completed = status.is_completed();
        self.status = status;
        if now_completed && !was_completed {
            self.completed_at = Some(Utc::now());
        } else if !now_completed {
            self.completed_at = None;
        }
    }

    /// Adds a label, preserving insertion order; duplicates are a no-op
    pub fn add_label(&mut self, label: String) {
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    /// Removes a label if present
    pub fn remove_label(&mut self, label: &str) {
        self.labels.retain(|l| l != label);
    }

    /// Appends a comment and returns its generated id
    pub fn add_comment(&mut self, text: String, attachments: Vec<Attachment>) -> String {
        let comment = Comment::new(text, attachments);
        let id = comment.id.clone();
        self.comments.push(comment);
        id
    }

    /// Removes a comment by id
    pub fn remove_comment(&mut self, comment_id: &str) -> Result<(), crate::error::TaskboardError> {
        if let Some(pos) = self.comments.iter().position(|c| c.id == comment_id) {
            self.comments.remove(pos);
            Ok(())
        } else {
            Err(crate::error::TaskboardError::CommentNotFound(
                comment_id.to_string(),
            ))
        }
    }

    /// A task is overdue when its due date has passed and it is not completed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && !self.status.is_completed(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_ids_are_unique() {
        let a = TaskId::new();
        let b = TaskId::new();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_task_id_parsing() {
        assert!(TaskId::from_str("some-id").is_ok());
        assert!(TaskId::from_str("").is_err());
        assert!(TaskId::from_str("   ").is_err());
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Write report".to_string());
        assert_eq!(task.status, ColumnId::todo());
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.labels.is_empty());
        assert!(task.comments.is_empty());
        assert!(task.completed_at.is_none());
        assert!(task.deleted_at.is_none());
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(Priority::from_str("high").unwrap(), Priority::High);
        assert_eq!(Priority::from_str("MEDIUM").unwrap(), Priority::Medium);
        assert!(Priority::from_str("urgent").is_err());
    }

    #[test]
    fn test_status_transition_stamps_completed_at() {
        let mut task = Task::new("Test".to_string());
        assert!(task.completed_at.is_none());

        task.set_status(ColumnId::completed());
        assert!(task.completed_at.is_some());

        task.set_status(ColumnId::in_progress());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_repeated_completion_keeps_first_stamp() {
        let mut task = Task::new("Test".to_string());
        task.set_status(ColumnId::completed());
        let first = task.completed_at;

        task.set_status(ColumnId::completed());
        assert_eq!(task.completed_at, first);
    }

    #[test]
    fn test_labels_are_duplicate_free_and_ordered() {
        let mut task = Task::new("Test".to_string());
        task.add_label("work".to_string());
        task.add_label("urgent".to_string());
        task.add_label("work".to_string());
        assert_eq!(task.labels, vec!["work", "urgent"]);

        task.remove_label("work");
        assert_eq!(task.labels, vec!["urgent"]);
    }

    #[test]
    fn test_comments_append_and_remove() {
        let mut task = Task::new("Test".to_string());
        let first = task.add_comment("first".to_string(), Vec::new());
        let second = task.add_comment("second".to_string(), Vec::new());
        assert_eq!(task.comments.len(), 2);
        assert_eq!(task.comments[0].id, first);

        task.remove_comment(&first).unwrap();
        assert_eq!(task.comments.len(), 1);
        assert_eq!(task.comments[0].id, second);

        assert!(task.remove_comment("missing").is_err());
    }

    #[test]
    fn test_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut task = Task::new("Test".to_string());

        assert!(!task.is_overdue(today));

        task.due_date = NaiveDate::from_ymd_opt(2024, 6, 10);
        assert!(task.is_overdue(today));

        task.set_status(ColumnId::completed());
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let mut task = Task::new("Test".to_string());
        task.due_date = NaiveDate::from_ymd_opt(2024, 6, 10);
        let json = serde_json::to_string(&task).unwrap();

        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"dueDate\":\"2024-06-10\""));
        // Never-set optional fields are omitted entirely
        assert!(!json.contains("completedAt"));
        assert!(!json.contains("deletedAt"));
    }

    #[test]
    fn test_legacy_record_deserialization() {
        // Record shape written by earlier application versions: no priority,
        // labels, comments, or completion fields.
        let old_json = r#"{
            "id": "5d3f8a60-1111-2222-3333-444455556666",
            "title": "Old Task",
            "status": "todo",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;

        let task: Task = serde_json::from_str(old_json).unwrap();
        assert_eq!(task.title, "Old Task");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.labels.is_empty());
        assert!(task.comments.is_empty());
        assert!(task.due_date.is_none());
        assert!(task.deleted_at.is_none());
    }
}
