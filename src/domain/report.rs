use crate::domain::column::{ColumnId, StatusColumn};
use crate::domain::task::{Priority, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-column task count, in board column order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub column_id: ColumnId,
    pub count: usize,
}

/// Task counts per priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriorityDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Summary statistics over the active task collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    /// Neither completed nor in progress
    pub pending_tasks: usize,
    pub overdue_tasks: usize,
    pub priority_distribution: PriorityDistribution,
    pub status_distribution: Vec<StatusCount>,
    /// Percentage, rounded to one decimal; 0 when there are no tasks
    pub completion_rate: f64,
    /// Mean of ceil(completedAt - createdAt) in whole days, rounded to one
    /// decimal; 0 when no completed task carries both timestamps
    pub average_completion_time: f64,
}

/// Computes summary statistics for `tasks`. `columns` supplies the board's
/// column set so every column appears in the status distribution, zero counts
/// included.
pub fn aggregate(tasks: &[Task], columns: &[StatusColumn], now: DateTime<Utc>) -> ReportSummary {
    let today = now.date_naive();

    let completed_tasks = tasks.iter().filter(|t| t.status.is_completed()).count();
    let in_progress_tasks = tasks.iter().filter(|t| t.status.is_in_progress()).count();
    let pending_tasks = tasks
        .iter()
        .filter(|t| !t.status.is_completed() && !t.status.is_in_progress())
        .count();
    let overdue_tasks = tasks.iter().filter(|t| t.is_overdue(today)).count();

    let mut priority_distribution = PriorityDistribution::default();
    for task in tasks {
        match task.priority {
            Priority::Low => priority_distribution.low += 1,
            Priority::Medium => priority_distribution.medium += 1,
            Priority::High => priority_distribution.high += 1,
        }
    }

    let status_distribution = columns
        .iter()
        .map(|column| StatusCount {
            column_id: column.id.clone(),
            count: tasks.iter().filter(|t| t.status == column.id).count(),
        })
        .collect();

    let completion_rate = if tasks.is_empty() {
        0.0
    } else {
        round_to_one_decimal(completed_tasks as f64 / tasks.len() as f64 * 100.0)
    };

    let completion_days: Vec<f64> = tasks
        .iter()
        .filter(|t| t.status.is_completed())
        .filter_map(|t| t.completed_at.map(|done| done - t.created_at))
        .map(|elapsed| (elapsed.num_milliseconds().abs() as f64 / 86_400_000.0).ceil())
        .collect();

    let average_completion_time = if completion_days.is_empty() {
        0.0
    } else {
        round_to_one_decimal(completion_days.iter().sum::<f64>() / completion_days.len() as f64)
    };

    ReportSummary {
        total_tasks: tasks.len(),
        completed_tasks,
        in_progress_tasks,
        pending_tasks,
        overdue_tasks,
        priority_distribution,
        status_distribution,
        completion_rate,
        average_completion_time,
    }
}

fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
