//! Object store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found")]
    NotFound,

    #[error("store rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("http error")]
    Transport(#[from] reqwest::Error),

    #[error("malformed store payload: {0}")]
    Decode(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
