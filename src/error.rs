use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Status column not found: {0}")]
    ColumnNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Machine-readable error category handed to the UI next to the
/// human-readable `Display` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Forbidden,
    Persistence,
}

impl TaskboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::TaskNotFound(_) | Self::ColumnNotFound(_) | Self::CommentNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Storage(_) | Self::Io(_) | Self::Serialization(_) => ErrorKind::Persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            TaskboardError::Validation("empty title".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            TaskboardError::TaskNotFound("abc".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            TaskboardError::ColumnNotFound("review".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            TaskboardError::Forbidden("built-in column".into()).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            TaskboardError::Storage("write failed".into()).kind(),
            ErrorKind::Persistence
        );
    }

    #[test]
    fn test_error_messages() {
        let err = TaskboardError::Conflict("column id 'review' already exists".into());
        assert_eq!(
            err.to_string(),
            "Conflict: column id 'review' already exists"
        );
    }
}
