//! Error types shared by the engine and the task optimizer.

/// Result alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizeError>;

/// Errors that abort an optimization run.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OptimizeError {
    /// The request contained no tasks.
    #[error("invalid input: task list is empty")]
    EmptyTaskList,

    /// Engine parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The search itself failed.
    #[error("optimization failed: {0}")]
    Search(String),
}
