use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during document chunking
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Token encode/decode failure
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] docbot_tokenizer::TokenizerError),
}

/// Errors raised while extracting a single document.
///
/// Extraction failures stay scoped to their document: the ingestion
/// aggregator logs them and moves on, so one corrupt file never aborts a
/// batch.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// IO error while reading the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be parsed
    #[error("Parse error in {document}: {reason}")]
    Parse {
        /// Document identifier
        document: String,
        /// Extractor failure message
        reason: String,
    },

    /// Chunking the extracted text failed
    #[error("Chunking failed: {0}")]
    Chunking(#[from] ChunkerError),
}
