use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectError>;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("output location is not writable: {0}")]
    OutputUnwritable(String),

    #[error("record name space exhausted after {attempts} attempts for {stem}")]
    NameExhausted { stem: String, attempts: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
