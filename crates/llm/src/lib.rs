//! # docbot LLM
//!
//! The completion-model boundary: chat message types, the [`Completion`]
//! trait, and an OpenAI-compatible HTTP client. Both answer generation and
//! history summarization go through this one seam.

mod completion;
mod error;
mod types;

pub use completion::{Completion, OpenAiClient};
pub use error::{CompletionError, Result};
pub use types::{ChatMessage, CompletionRequest, Role};
