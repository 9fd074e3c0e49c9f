//! # docbot Chunker
//!
//! Turns per-page document text and extracted tables into token-bounded,
//! overlapping chunks ready for embedding.
//!
//! ## Pipeline
//!
//! ```text
//! Document (PDF, ...)
//!     │
//!     ├──> DocumentSource: (page, text) and (page, table rows)
//!     │
//!     ├──> per block: blank-line paragraph split
//!     │    └─> token buffer with overlap carry-over
//!     │
//!     └──> DocumentChunk[] with {document, page} provenance
//! ```
//!
//! Extraction failures are scoped per document: [`chunk_all`] logs them and
//! continues with the rest of the batch.

mod chunker;
mod config;
mod error;
mod pdf;
mod source;
mod types;

pub use chunker::{serialize_table, Chunker};
pub use config::ChunkerConfig;
pub use error::{ChunkerError, ExtractionError, Result};
pub use pdf::PdfDocument;
pub use source::{chunk_all, chunk_source, DocumentFailure, DocumentSource, IngestOutcome};
pub use types::{ChunkSource, DocumentChunk, PageTable, PageText};
