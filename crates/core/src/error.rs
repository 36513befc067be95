use thiserror::Error;

#[derive(Error, Debug)]
pub enum DieIndexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
    #[error("Unknown index category: {0}")]
    UnknownCategory(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rayon::ThreadPoolBuildError> for DieIndexError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        DieIndexError::ThreadPool(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DieIndexError>;
