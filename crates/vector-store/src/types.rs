use docbot_chunker::DocumentChunk;
use serde::{Deserialize, Serialize};

/// A chunk plus its embedding vector, as persisted by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    pub chunk: DocumentChunk,
    pub vector: Vec<f32>,
}

/// One similarity-search result.
///
/// `score` is cosine similarity against the query: higher means more
/// similar. Stores backed by a distance metric must convert their scores
/// before handing hits to the ranking layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedHit {
    /// Stored chunk text
    pub text: String,

    /// Document identifier the chunk came from
    pub source: String,

    /// Page number within the document
    pub page: u32,

    /// Similarity score, higher = more similar
    pub score: f32,

    /// Lexical boost, filled in by the ranking layer
    pub boost: Option<f32>,
}

impl RetrievedHit {
    /// Create a hit with no boost attached
    pub fn new(text: impl Into<String>, source: impl Into<String>, page: u32, score: f32) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            page,
            score,
            boost: None,
        }
    }
}
