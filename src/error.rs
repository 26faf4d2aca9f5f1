use thiserror::Error;

/// Error type for Todoist REST API operations.
///
/// - `RequestFailed`: network/transport errors, including timeouts (wraps `reqwest::Error`)
/// - `Api`: any non-2xx status code, with the server's error detail
/// - `Serialization`: a request body could not be encoded or a response body decoded
/// - `Cancelled`: the client's cancellation token fired before the call completed
/// - `InvalidConfig`: the client could not be built from the given configuration
#[derive(Debug, Error)]
pub enum TodoistError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TodoistError {
    /// HTTP status of an [`TodoistError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the per-request deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestFailed(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, TodoistError>;
