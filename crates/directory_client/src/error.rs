use reqwest::StatusCode;
use shared::error::{ApplicationError, EnvelopeError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Connectivity,
    Decode,
    Application,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error! status: {status}")]
    Transport { status: StatusCode },
    #[error("connection failed: {0}")]
    Connectivity(#[source] reqwest::Error),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed response envelope: `{0}` is missing")]
    IncompleteEnvelope(&'static str),
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Connectivity(_) => ErrorKind::Connectivity,
            Self::Decode(_) | Self::IncompleteEnvelope(_) => ErrorKind::Decode,
            Self::Application(_) => ErrorKind::Application,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport { status } => Some(*status),
            Self::Connectivity(err) => err.status(),
            _ => None,
        }
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(value: EnvelopeError) -> Self {
        match value {
            EnvelopeError::Rejected(rejected) => Self::Application(rejected),
            EnvelopeError::MissingField(field) => Self::IncompleteEnvelope(field),
        }
    }
}
