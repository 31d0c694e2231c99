use crate::domain::column::ColumnId;
use crate::domain::task::{Priority, Task};
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Due-date window a filter can restrict to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
    Overdue,
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "today" => Ok(TimeWindow::Today),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "overdue" => Ok(TimeWindow::Overdue),
            _ => Err(format!(
                "Invalid time window '{}'. Valid windows: all, today, week, month, overdue",
                s
            )),
        }
    }
}

/// Active filter criteria. Every populated criterion must hold for a task to
/// pass (conjunctive).
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub status: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub search_text: Option<String>,
    pub labels: Vec<String>,
    pub time_window: TimeWindow,
}

impl FilterCriteria {
    pub fn with_status(mut self, status: ColumnId) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = window;
        self
    }
}

/// Computes the visible subset of `tasks` under `criteria`.
///
/// Result order is stable and preserves input order; any further sorting is a
/// presentation concern layered on top. `now` is explicit so the time-window
/// predicates stay deterministic under test.
///
/// Note: `week` and `month` windows compare the due date against a future
/// bound with `<=`, so already-overdue tasks satisfy them as well. This
/// mirrors the shipped application behavior.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| matches_status(task, criteria))
        .filter(|task| matches_priority(task, criteria))
        .filter(|task| matches_search(task, criteria))
        .filter(|task| matches_labels(task, criteria))
        .filter(|task| matches_time_window(task, criteria.time_window, now))
        .collect()
}

/// The de-duplicated union of all labels currently in use, in first-seen order
pub fn available_labels(tasks: &[Task]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for task in tasks {
        for label in &task.labels {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
    }
    labels
}

fn matches_status(task: &Task, criteria: &FilterCriteria) -> bool {
    match &criteria.status {
        Some(status) => &task.status == status,
        None => true,
    }
}

fn matches_priority(task: &Task, criteria: &FilterCriteria) -> bool {
    match criteria.priority {
        Some(priority) => task.priority == priority,
        None => true,
    }
}

fn matches_search(task: &Task, criteria: &FilterCriteria) -> bool {
    let term = match &criteria.search_text {
        Some(t) if !t.trim().is_empty() => t.to_lowercase(),
        _ => return true,
    };

    let title_matches = task.title.to_lowercase().contains(&term);
    let description_matches = task
        .description
        .as_ref()
        .map(|d| d.to_lowercase().contains(&term))
        .unwrap_or(false);

    title_matches || description_matches
}

fn matches_labels(task: &Task, criteria: &FilterCriteria) -> bool {
    criteria
        .labels
        .iter()
        .all(|label| task.labels.contains(label))
}

fn matches_time_window(task: &Task, window: TimeWindow, now: DateTime<Utc>) -> bool {
    if window == TimeWindow::All {
        return true;
    }

    let due = match task.due_date {
        Some(due) => due,
        None => return false,
    };
    let today = now.date_naive();

    match window {
        TimeWindow::All => true,
        TimeWindow::Today => due == today,
        TimeWindow::Week => due <= (now + Duration::days(7)).date_naive(),
        TimeWindow::Month => due <= today + Months::new(1),
        TimeWindow::Overdue => due < today && !task.status.is_completed(),
    }
}
