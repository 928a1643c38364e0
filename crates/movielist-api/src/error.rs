use movielist_models::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Error decoding {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },

    #[error("Invalid {endpoint} response: {source}")]
    Invalid {
        endpoint: String,
        source: ModelError,
    },

    #[error("{endpoint} returned neither a message nor an error: {body}")]
    UnexpectedResponse { endpoint: String, body: String },

    /// The server's own `error` text, kept verbatim.
    #[error("{0}")]
    Server(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse error classes the UI reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, DNS, timeout, or a non-success status with no error body.
    Transport,
    /// Malformed or unexpected JSON.
    Decode,
    /// The server populated `error`.
    Server,
    /// Rejected locally before any request was sent.
    InvalidRequest,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) | ApiError::Status { .. } => ErrorKind::Transport,
            ApiError::Decode { .. }
            | ApiError::Invalid { .. }
            | ApiError::UnexpectedResponse { .. } => ErrorKind::Decode,
            ApiError::Server(_) => ErrorKind::Server,
            ApiError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}
