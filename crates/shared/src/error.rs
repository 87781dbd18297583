use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `success: false` answer from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApplicationError {
    pub message: String,
}

impl ApplicationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error(transparent)]
    Rejected(#[from] ApplicationError),
    #[error("envelope reported success but `{0}` is missing")]
    MissingField(&'static str),
}
