use crate::store::SessionTurn;
use docbot_llm::{ChatMessage, Completion, CompletionRequest};
use docbot_tokenizer::Tokenizer;
use thiserror::Error;

/// Errors from history summarization
#[derive(Error, Debug)]
pub enum SummarizerError {
    /// Token accounting failed while bounding the transcript
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] docbot_tokenizer::TokenizerError),

    /// The summarization completion call failed
    #[error("Completion error: {0}")]
    Completion(#[from] docbot_llm::CompletionError),
}

/// Configuration for conversation summarization
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Model used for the summarization call
    pub model: String,

    /// Token budget for the serialized history; the oldest turns are
    /// truncated from the front to fit
    pub max_history_tokens: usize,

    /// Output cap for the summary itself
    pub max_summary_tokens: u32,

    /// Sampling temperature for the summarization call
    pub temperature: f32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_history_tokens: 800,
            max_summary_tokens: 300,
            temperature: 0.2,
        }
    }
}

const SUMMARY_INSTRUCTION: &str =
    "Summarize the following conversation concisely and factually.";

/// Compresses prior turns of a session into a short textual summary.
///
/// The summary is regenerated fresh on every call from the full turn
/// history; nothing is kept between calls.
pub struct Summarizer {
    config: SummarizerConfig,
    tokenizer: Tokenizer,
}

impl Summarizer {
    /// Create a summarizer
    pub fn new(config: SummarizerConfig, tokenizer: Tokenizer) -> Self {
        Self { config, tokenizer }
    }

    /// Summarize the conversation so far.
    ///
    /// Returns an empty string without any model call when there are no
    /// turns or no completion client is configured. A failing completion
    /// call propagates; the caller decides whether to continue without a
    /// summary.
    pub async fn summarize(
        &self,
        completion: Option<&dyn Completion>,
        turns: &[SessionTurn],
    ) -> Result<String, SummarizerError> {
        let Some(completion) = completion else {
            return Ok(String::new());
        };
        if turns.is_empty() {
            return Ok(String::new());
        }

        let transcript = serialize_turns(turns);
        let bounded = self
            .tokenizer
            .tail(&transcript, self.config.max_history_tokens)?;

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SUMMARY_INSTRUCTION),
                ChatMessage::user(bounded),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_summary_tokens,
        };

        Ok(completion.complete(request).await?)
    }
}

/// Serialize turns as alternating question/answer blocks, oldest first
fn serialize_turns(turns: &[SessionTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("Question: {}\nAnswer: {}", turn.question, turn.answer))
        .collect::<Vec<_>>()
        .join("\n")
}
