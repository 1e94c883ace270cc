use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("No saved board under key {key}")]
    NotFound { key: String },

    #[error("Corrupted save data: {0}")]
    CorruptData(#[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Board cannot be saved: {0}")]
    InvalidData(String),

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },
}

impl PersistError {
    /// Every persistence failure leaves the board untouched; this says
    /// whether retrying the same operation can succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PersistError::NotFound { .. } => true,
            PersistError::Io(_) => true,
            PersistError::CorruptData(_) => false,
            PersistError::Serialization(_) => false,
            PersistError::InvalidData(_) => false,
            PersistError::InvalidKey { .. } => false,
        }
    }
}
