use serde::{Deserialize, Serialize};

/// A token-bounded span of document text with its provenance.
///
/// The unit handed to the embedding step. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentChunk {
    /// The chunk text
    pub content: String,

    /// Where the text came from
    pub source: ChunkSource,
}

impl DocumentChunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(content: String, source: ChunkSource) -> Self {
        Self { content, source }
    }
}

/// Document and page a chunk was extracted from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChunkSource {
    /// Document identifier (filename)
    pub document: String,

    /// Page number (1-indexed)
    pub page: u32,
}

impl ChunkSource {
    /// Create a new source reference
    pub fn new(document: impl Into<String>, page: u32) -> Self {
        Self {
            document: document.into(),
            page,
        }
    }
}

/// Raw text of one document page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed)
    pub page: u32,

    /// Raw page text as produced by the extractor
    pub text: String,
}

/// Extracted table rows of one document page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageTable {
    /// Page number (1-indexed)
    pub page: u32,

    /// Table cells, row-major; missing cells are empty strings
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_source_equality_and_hash() {
        let a = ChunkSource::new("doc.pdf", 1);
        let b = ChunkSource::new("doc.pdf", 1);
        let c = ChunkSource::new("doc.pdf", 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn chunk_round_trips_through_json() {
        let chunk = DocumentChunk::new(
            "some text".to_string(),
            ChunkSource::new("handbook.pdf", 4),
        );
        let json = serde_json::to_string(&chunk).unwrap();
        let back: DocumentChunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chunk);
    }
}
