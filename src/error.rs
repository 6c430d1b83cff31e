use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskBoardError>;

#[derive(Debug, Error)]
pub enum TaskBoardError {
    #[error("Invalid column ID: {0:?}")]
    InvalidColumnId(String),

    #[error("Invalid task ID: {0:?}")]
    InvalidTaskId(String),

    #[error("Invalid slot key: {0:?}")]
    InvalidSlotKey(String),

    #[error("Malformed configuration: {0}")]
    MalformedConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
