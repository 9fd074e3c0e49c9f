use thiserror::Error;

/// Result type for completion calls
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Errors from the completion model boundary
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Completion API error: {status} {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The API answered but carried no usable message
    #[error("Completion response contained no content")]
    EmptyResponse,
}
