use thiserror::Error;

use crate::persistence::PersistError;
use crate::token::TokenId;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Unknown token: {0}")]
    UnknownToken(TokenId),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown formation mode: {0}")]
    UnknownMode(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config from {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub type Result<T> = std::result::Result<T, BoardError>;
