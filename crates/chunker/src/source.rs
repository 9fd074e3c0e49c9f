use crate::chunker::Chunker;
use crate::error::ExtractionError;
use crate::types::{DocumentChunk, PageTable, PageText};

/// A document that can yield per-page text and tables.
///
/// Implementations own the extraction details (PDF parsing, table
/// detection). The chunking pipeline only sees pages and tables.
pub trait DocumentSource {
    /// Document identifier, used as chunk provenance (typically the filename)
    fn name(&self) -> &str;

    /// Ordered per-page raw text
    fn pages(&self) -> Result<Vec<PageText>, ExtractionError>;

    /// Ordered per-page extracted tables
    fn tables(&self) -> Result<Vec<PageTable>, ExtractionError>;
}

/// One document that failed extraction during a batch run
#[derive(Debug)]
pub struct DocumentFailure {
    /// Document identifier
    pub document: String,

    /// What went wrong
    pub error: ExtractionError,
}

/// Result of chunking a batch of documents
#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Chunks from all documents that extracted cleanly
    pub chunks: Vec<DocumentChunk>,

    /// Documents that failed and contributed zero chunks
    pub failures: Vec<DocumentFailure>,
}

/// Extract and chunk a single document.
pub fn chunk_source(
    chunker: &Chunker,
    source: &dyn DocumentSource,
) -> Result<Vec<DocumentChunk>, ExtractionError> {
    let pages = source.pages()?;
    let tables = source.tables()?;
    Ok(chunker.chunk_document(source.name(), &pages, &tables)?)
}

/// Chunk a batch of documents behind a per-document error boundary.
///
/// A document that fails extraction is logged and recorded in the outcome;
/// the remaining documents are still processed.
pub fn chunk_all(chunker: &Chunker, sources: &[Box<dyn DocumentSource>]) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();

    for source in sources {
        match chunk_source(chunker, source.as_ref()) {
            Ok(chunks) => {
                log::debug!("Chunked {} into {} chunks", source.name(), chunks.len());
                outcome.chunks.extend(chunks);
            }
            Err(error) => {
                log::warn!("Skipping {}: {error}", source.name());
                outcome.failures.push(DocumentFailure {
                    document: source.name().to_string(),
                    error,
                });
            }
        }
    }

    outcome
}
