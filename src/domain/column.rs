use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a status column, normalized to lowercase hyphenated form
/// (e.g. `todo`, `in-progress`, `code-review`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    const TODO: &'static str = "todo";
    const IN_PROGRESS: &'static str = "in-progress";
    const COMPLETED: &'static str = "completed";

    /// The initial column new tasks land in
    pub fn todo() -> Self {
        Self(Self::TODO.to_string())
    }

    pub fn in_progress() -> Self {
        Self(Self::IN_PROGRESS.to_string())
    }

    /// The terminal column; entering it stamps a task's completion time
    pub fn completed() -> Self {
        Self(Self::COMPLETED.to_string())
    }

    /// Derives a column id from free text: trimmed, lowercased, whitespace
    /// runs collapsed to single hyphens
    pub fn from_name(name: &str) -> Self {
        Self(
            name.trim()
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-"),
        )
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the three fixed built-in columns
    pub fn is_builtin(&self) -> bool {
        let id = self.0.as_str();
        id == Self::TODO || id == Self::IN_PROGRESS || id == Self::COMPLETED
    }

    pub fn is_completed(&self) -> bool {
        self.0 == Self::COMPLETED
    }

    pub fn is_in_progress(&self) -> bool {
        self.0 == Self::IN_PROGRESS
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A workflow stage on the board. `icon` and `color` are presentation hints,
/// semantically opaque to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusColumn {
    pub id: ColumnId,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_icon() -> String {
    "tag".to_string()
}

fn default_color() -> String {
    "gray".to_string()
}

impl StatusColumn {
    pub fn new(id: ColumnId, name: String, icon: Option<String>, color: Option<String>) -> Self {
        Self {
            id,
            name,
            icon: icon.unwrap_or_else(default_icon),
            color: color.unwrap_or_else(default_color),
            created_at: Utc::now(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.id.is_builtin()
    }

    /// The three fixed columns every board carries, with the default
    /// presentation hints of the desktop application
    pub fn builtin_columns() -> Vec<StatusColumn> {
        vec![
            StatusColumn::new(
                ColumnId::todo(),
                "To Do".to_string(),
                Some("list".to_string()),
                Some("blue".to_string()),
            ),
            StatusColumn::new(
                ColumnId::in_progress(),
                "In Progress".to_string(),
                Some("clock".to_string()),
                Some("orange".to_string()),
            ),
            StatusColumn::new(
                ColumnId::completed(),
                "Completed".to_string(),
                Some("check-circle".to_string()),
                Some("green".to_string()),
            ),
        ]
    }
}
