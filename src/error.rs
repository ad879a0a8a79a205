use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Drag payload is empty")]
    EmptyPayload,

    #[error("Invalid drag payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid board configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
