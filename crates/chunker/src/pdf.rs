use crate::error::ExtractionError;
use crate::source::DocumentSource;
use crate::types::{PageTable, PageText};
use std::path::{Path, PathBuf};

/// A PDF file on disk, read through `pdf-extract`.
///
/// Text only: `pdf-extract` has no table detection, so `tables` is always
/// empty. Callers with a table extractor wire it in through their own
/// [`DocumentSource`] implementation.
pub struct PdfDocument {
    path: PathBuf,
    name: String,
}

impl PdfDocument {
    /// Create a source for the PDF at `path`. The chunk provenance name is
    /// the file name.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

impl DocumentSource for PdfDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn pages(&self) -> Result<Vec<PageText>, ExtractionError> {
        let pages = pdf_extract::extract_text_by_pages(&self.path).map_err(|e| {
            ExtractionError::Parse {
                document: self.name.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(idx, text)| PageText {
                page: idx as u32 + 1,
                text,
            })
            .collect())
    }

    fn tables(&self) -> Result<Vec<PageTable>, ExtractionError> {
        Ok(Vec::new())
    }
}
