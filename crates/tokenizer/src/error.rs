use thiserror::Error;

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, TokenizerError>;

/// Errors that can occur while encoding or decoding tokens
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// No encoding is known for the requested model
    #[error("Unknown model or encoding: {0}")]
    UnknownModel(String),

    /// Token ids could not be decoded back into text
    #[error("Decode error: {0}")]
    DecodeError(String),
}
