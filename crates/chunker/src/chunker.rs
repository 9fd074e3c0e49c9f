use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::types::{ChunkSource, DocumentChunk, PageTable, PageText};
use docbot_tokenizer::Tokenizer;

/// Splits per-page document text and tables into token-bounded,
/// paragraph-aligned chunks with a fixed token overlap between
/// consecutive chunks of the same block.
pub struct Chunker {
    config: ChunkerConfig,
    tokenizer: Tokenizer,
}

impl Chunker {
    /// Create a new chunker with configuration
    pub fn new(config: ChunkerConfig, tokenizer: Tokenizer) -> Result<Self> {
        config.validate().map_err(ChunkerError::InvalidConfig)?;
        Ok(Self { config, tokenizer })
    }

    /// Chunk one document's pages and tables.
    ///
    /// Every page text and every page table is chunked independently; chunks
    /// never span block boundaries. Each chunk carries the document name and
    /// the page it came from.
    pub fn chunk_document(
        &self,
        document: &str,
        pages: &[PageText],
        tables: &[PageTable],
    ) -> Result<Vec<DocumentChunk>> {
        let mut chunks = Vec::new();

        for page in pages {
            self.chunk_block(&page.text, document, page.page, &mut chunks)?;
        }

        for table in tables {
            let text = serialize_table(&table.rows);
            self.chunk_block(&text, document, table.page, &mut chunks)?;
        }

        Ok(chunks)
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    fn chunk_block(
        &self,
        text: &str,
        document: &str,
        page: u32,
        out: &mut Vec<DocumentChunk>,
    ) -> Result<()> {
        for tokens in self.split_block(text) {
            let content = self.tokenizer.decode(&tokens)?;
            out.push(DocumentChunk::new(content, ChunkSource::new(document, page)));
        }
        Ok(())
    }

    /// Core splitting pass over one text block, at the token level.
    ///
    /// Paragraphs (blank-line separated) are accumulated into a token buffer.
    /// When a paragraph would push the buffer past `max_tokens`, the buffer
    /// is flushed as a chunk and the next buffer is seeded with the last
    /// `overlap_tokens` tokens of the flushed one. A single paragraph larger
    /// than `max_tokens` is never split further; it is emitted oversized,
    /// together with any overlap carried into it.
    fn split_block(&self, text: &str) -> Vec<Vec<u32>> {
        let max_tokens = self.config.max_tokens;
        let overlap = self.config.overlap_tokens;

        let mut buffer: Vec<u32> = Vec::new();
        let mut result: Vec<Vec<u32>> = Vec::new();

        for paragraph in text.split("\n\n") {
            let para_tokens = self.tokenizer.encode(paragraph);

            if buffer.len() + para_tokens.len() > max_tokens {
                let overlap_start = buffer.len().saturating_sub(overlap);
                let mut seeded = buffer[overlap_start..].to_vec();
                seeded.extend_from_slice(&para_tokens);

                if !buffer.is_empty() {
                    result.push(std::mem::take(&mut buffer));
                }
                buffer = seeded;
            } else {
                buffer.extend_from_slice(&para_tokens);
            }
        }

        if !buffer.is_empty() {
            result.push(buffer);
        }

        result
    }
}

/// Serialize extracted table rows as pipe-delimited lines.
///
/// Empty rows are dropped; empty cells render as empty strings, so column
/// positions stay visible.
#[must_use]
pub fn serialize_table(rows: &[Vec<String>]) -> String {
    rows.iter()
        .filter(|row| !row.is_empty())
        .map(|row| row.join(" | "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunker(max_tokens: usize, overlap_tokens: usize) -> Chunker {
        let config = ChunkerConfig {
            max_tokens,
            overlap_tokens,
        };
        Chunker::new(config, Tokenizer::for_model("gpt-4").unwrap()).unwrap()
    }

    fn paragraphs(words_per_para: usize, count: usize) -> String {
        let para = vec!["alpha beta gamma"; words_per_para / 3].join(" ");
        vec![para; count].join("\n\n")
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ChunkerConfig {
            max_tokens: 10,
            overlap_tokens: 10,
        };
        let result = Chunker::new(config, Tokenizer::for_model("gpt-4").unwrap());
        assert!(matches!(result, Err(ChunkerError::InvalidConfig(_))));
    }

    #[test]
    fn empty_block_produces_no_chunks() {
        let chunker = chunker(30, 5);
        assert!(chunker.split_block("").is_empty());
        assert!(chunker.split_block("\n\n").is_empty());
    }

    #[test]
    fn small_block_is_a_single_chunk() {
        let chunker = chunker(100, 5);
        let text = "one short paragraph that fits comfortably";
        let chunks = chunker.split_block(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(
            chunks[0],
            Tokenizer::for_model("gpt-4").unwrap().encode(text)
        );
    }

    #[test]
    fn chunks_respect_token_budget() {
        let tok = Tokenizer::for_model("gpt-4").unwrap();
        let max_tokens = 30;
        let overlap = 5;
        let chunker = chunker(max_tokens, overlap);
        let text = paragraphs(9, 12);

        // Precondition for the bound: every paragraph fits even after the
        // overlap carry-over.
        for para in text.split("\n\n") {
            assert!(tok.encode(para).len() <= max_tokens - overlap);
        }

        let chunks = chunker.split_block(&text);
        assert!(chunks.len() > 1, "input should split into several chunks");
        for tokens in &chunks {
            assert!(
                tokens.len() <= max_tokens,
                "chunk has {} tokens, budget is {max_tokens}",
                tokens.len()
            );
        }
    }

    #[test]
    fn consecutive_chunks_share_the_overlap() {
        let overlap = 5;
        let chunker = chunker(30, overlap);
        let chunks = chunker.split_block(&paragraphs(9, 12));
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.len() < overlap || next.len() < overlap {
                continue;
            }
            assert_eq!(
                prev[prev.len() - overlap..],
                next[..overlap],
                "chunk tail and successor head must match"
            );
        }
    }

    #[test]
    fn oversized_paragraph_is_emitted_verbatim() {
        let tok = Tokenizer::for_model("gpt-4").unwrap();
        let chunker = chunker(10, 2);
        let text =
            "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi omicron pi";
        let ids = tok.encode(text);
        assert!(ids.len() > 10, "test paragraph must exceed the budget");

        let chunks = chunker.split_block(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], ids);
    }

    #[test]
    fn chunk_document_attaches_page_metadata() {
        let chunker = chunker(100, 5);
        let pages = vec![
            PageText {
                page: 1,
                text: "first page".to_string(),
            },
            PageText {
                page: 2,
                text: "second page".to_string(),
            },
        ];
        let chunks = chunker.chunk_document("doc.pdf", &pages, &[]).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].source, ChunkSource::new("doc.pdf", 1));
        assert_eq!(chunks[0].content, "first page");
        assert_eq!(chunks[1].source, ChunkSource::new("doc.pdf", 2));
        assert_eq!(chunks[1].content, "second page");
    }

    #[test]
    fn tables_are_serialized_and_chunked() {
        let chunker = chunker(100, 5);
        let tables = vec![PageTable {
            page: 3,
            rows: vec![
                vec!["degree".to_string(), "semesters".to_string()],
                vec!["bachelor".to_string(), "6".to_string()],
                vec![],
                vec!["master".to_string(), String::new()],
            ],
        }];
        let chunks = chunker.chunk_document("doc.pdf", &[], &tables).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source, ChunkSource::new("doc.pdf", 3));
        assert_eq!(chunks[0].content, "degree | semesters\nbachelor | 6\nmaster | ");
    }

    #[test]
    fn serialize_table_renders_empty_cells() {
        let rows = vec![
            vec!["a".to_string(), String::new(), "c".to_string()],
            vec![String::new(), "b".to_string()],
        ];
        assert_eq!(serialize_table(&rows), "a |  | c\n | b");
    }

    #[test]
    fn page_chunks_come_before_table_chunks() {
        let chunker = chunker(100, 5);
        let pages = vec![PageText {
            page: 1,
            text: "page text".to_string(),
        }];
        let tables = vec![PageTable {
            page: 1,
            rows: vec![vec!["cell".to_string()]],
        }];
        let chunks = chunker.chunk_document("doc.pdf", &pages, &tables).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "page text");
        assert_eq!(chunks[1].content, "cell");
    }
}
