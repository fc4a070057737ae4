//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or client construction).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The API answered with a body that does not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Pagination parameters outside `page >= 1`, `limit > 0`.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// The request body could not be built from the submitted values.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl Error {
    /// HTTP status code for status errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
