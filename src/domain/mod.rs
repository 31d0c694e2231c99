pub mod column;
pub mod filter;
pub mod report;
pub mod task;

pub use column::{ColumnId, StatusColumn};
pub use filter::{available_labels, filter_tasks, FilterCriteria, TimeWindow};
pub use report::{aggregate, PriorityDistribution, ReportSummary, StatusCount};
pub use task::{Attachment, Comment, Priority, Task, TaskId};
