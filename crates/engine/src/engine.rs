use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use docbot_chunker::{chunk_all, Chunker, DocumentSource};
use docbot_llm::{Completion, CompletionRequest};
use docbot_retrieval::{assemble, build_prompt, rank, ContextChunk};
use docbot_session::{SessionTurn, Summarizer};
use docbot_tokenizer::Tokenizer;
use docbot_vector_store::VectorStore;
use std::sync::Arc;

/// Outcome of one question
#[derive(Debug)]
pub enum Answer {
    /// Model answer plus the context window it was grounded on
    Reply {
        /// Generated answer text
        text: String,
        /// The passages that went into the prompt, in prompt order
        context: Vec<ContextChunk>,
    },

    /// Nothing usable was retrieved; no completion call was made.
    ///
    /// The caller surfaces this distinctly instead of letting the model
    /// answer from its own knowledge.
    NoContext,
}

/// Result of one ingestion run
#[derive(Debug)]
pub struct IngestReport {
    /// Chunks embedded and stored
    pub stored_chunks: usize,

    /// Documents that failed extraction, with the failure message
    pub failed_documents: Vec<(String, String)>,
}

/// The question/ingestion pipeline over a vector store and a completion
/// client.
///
/// Each question runs one sequential pass: retrieve → rank → assemble →
/// summarize history → build prompt → complete. The engine holds no
/// per-request state; session turns come in as parameters.
pub struct Engine<S: VectorStore> {
    store: S,
    completion: Option<Arc<dyn Completion>>,
    tokenizer: Tokenizer,
    chunker: Chunker,
    summarizer: Summarizer,
    config: EngineConfig,
}

impl<S: VectorStore> Engine<S> {
    /// Build an engine. `completion` may be absent for ingest-only use;
    /// asking a question then fails once context is found.
    pub fn new(
        config: EngineConfig,
        store: S,
        completion: Option<Arc<dyn Completion>>,
    ) -> Result<Self> {
        config
            .assembler
            .validate()
            .map_err(EngineError::InvalidConfig)?;

        let tokenizer = Tokenizer::for_model(&config.model)?;
        let chunker = Chunker::new(config.chunker, tokenizer.clone())?;
        let summarizer = Summarizer::new(config.summarizer.clone(), tokenizer.clone());

        Ok(Self {
            store,
            completion,
            tokenizer,
            chunker,
            summarizer,
            config,
        })
    }

    /// Access the underlying store (e.g. to persist it)
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Chunk, embed, and store a batch of documents.
    ///
    /// Extraction failures are confined to their document: they are logged,
    /// reported, and the rest of the batch proceeds.
    pub async fn ingest(&mut self, sources: &[Box<dyn DocumentSource>]) -> Result<IngestReport> {
        let outcome = chunk_all(&self.chunker, sources);

        let report = IngestReport {
            stored_chunks: outcome.chunks.len(),
            failed_documents: outcome
                .failures
                .into_iter()
                .map(|failure| (failure.document, failure.error.to_string()))
                .collect(),
        };

        self.store.upsert(outcome.chunks).await?;
        log::info!(
            "Ingested {} chunks ({} documents failed)",
            report.stored_chunks,
            report.failed_documents.len()
        );
        Ok(report)
    }

    /// Of `candidates`, the document names not yet present in the store
    pub async fn new_sources(&self, candidates: &[String]) -> Result<Vec<String>> {
        let stored = self.store.stored_sources().await?;
        Ok(candidates
            .iter()
            .filter(|name| !stored.contains(*name))
            .cloned()
            .collect())
    }

    /// Answer one question against the indexed documents.
    ///
    /// `turns` is the conversation so far, owned by the caller. Returns
    /// [`Answer::NoContext`] without calling the model when retrieval yields
    /// nothing usable. Summarization and completion failures propagate.
    pub async fn ask(&self, question: &str, turns: &[SessionTurn]) -> Result<Answer> {
        let hits = self
            .store
            .search(question, self.config.retrieval.limit)
            .await?;
        let ranked = rank(hits, &self.config.retrieval.boost_terms);
        let context = assemble(&self.tokenizer, &ranked, &self.config.assembler);

        if context.is_empty() {
            log::info!("No usable context for question, skipping completion");
            return Ok(Answer::NoContext);
        }

        let completion = self
            .completion
            .as_deref()
            .ok_or(EngineError::MissingCompletion)?;

        let summary = self.summarizer.summarize(Some(completion), turns).await?;
        let messages = build_prompt(&context, question, &summary);

        let text = completion
            .complete(CompletionRequest {
                model: self.config.model.clone(),
                messages,
                temperature: self.config.temperature,
                max_tokens: self.config.max_answer_tokens,
            })
            .await?;

        Ok(Answer::Reply { text, context })
    }
}
