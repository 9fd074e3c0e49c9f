use docbot_chunker::ChunkerConfig;
use docbot_retrieval::AssemblerConfig;
use docbot_session::SummarizerConfig;

/// Retrieval parameters for one question
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// How many similarity hits to pull from the store
    pub limit: usize,

    /// Domain keywords that nudge matching hits up the ranking
    pub boost_terms: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: 30,
            boost_terms: Vec::new(),
        }
    }
}

/// Everything the engine needs for ingestion and answering.
///
/// All caps live here and are passed down explicitly; the engine reads no
/// globals or environment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Completion model for answers (also drives token accounting)
    pub model: String,

    /// Sampling temperature for answer generation
    pub temperature: f32,

    /// Output token cap for answers
    pub max_answer_tokens: u32,

    /// Chunking parameters for ingestion
    pub chunker: ChunkerConfig,

    /// Retrieval parameters
    pub retrieval: RetrievalConfig,

    /// Context window assembly caps
    pub assembler: AssemblerConfig,

    /// History summarization parameters
    pub summarizer: SummarizerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_answer_tokens: 1500,
            chunker: ChunkerConfig::default(),
            retrieval: RetrievalConfig::default(),
            assembler: AssemblerConfig::default(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_internally_valid() {
        let config = EngineConfig::default();
        assert!(config.chunker.validate().is_ok());
        assert!(config.assembler.validate().is_ok());
        assert!(config.retrieval.limit > 0);
    }
}
