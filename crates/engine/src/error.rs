use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the ask/ingest pipeline
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tokenizer could not be built for the configured model
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] docbot_tokenizer::TokenizerError),

    /// Chunking failed
    #[error("Chunker error: {0}")]
    Chunker(#[from] docbot_chunker::ChunkerError),

    /// Vector store operation failed
    #[error("Vector store error: {0}")]
    Store(#[from] docbot_vector_store::VectorStoreError),

    /// History summarization failed
    #[error("Summarizer error: {0}")]
    Summarizer(#[from] docbot_session::SummarizerError),

    /// The answer completion call failed
    #[error("Completion error: {0}")]
    Completion(#[from] docbot_llm::CompletionError),

    /// Context was found but no completion client is configured
    #[error("No completion client configured")]
    MissingCompletion,
}
