//! Token accounting for the completion model.
//!
//! Every token budget in the pipeline (chunk sizes, context assembly,
//! history truncation) is measured with the same BPE encoding the target
//! completion model uses, so counts line up with what the model actually
//! sees. Loaded encodings are shared process-wide: building the BPE tables
//! is expensive, and the chunker, assembler, and summarizer all count
//! against the same model.

mod error;

pub use error::{Result, TokenizerError};

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tiktoken_rs::{cl100k_base, get_bpe_from_model, o200k_base, CoreBPE};

static ENCODERS: Lazy<Mutex<HashMap<String, Arc<CoreBPE>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Stateless adapter around a model-specific BPE encoding.
///
/// Cheap to clone; clones share the underlying encoder.
#[derive(Clone)]
pub struct Tokenizer {
    bpe: Arc<CoreBPE>,
}

impl Tokenizer {
    /// Look up the encoding for a model name (e.g. "gpt-4o-mini") or a raw
    /// encoding name ("cl100k_base", "o200k_base"). Case-insensitive.
    pub fn for_model(model_or_encoding: &str) -> Result<Self> {
        let key = model_or_encoding.trim().to_ascii_lowercase();

        if let Ok(guard) = ENCODERS.lock() {
            if let Some(bpe) = guard.get(&key) {
                return Ok(Self { bpe: bpe.clone() });
            }
        }

        let bpe = match get_bpe_from_model(&key) {
            Ok(bpe) => bpe,
            Err(_) => match key.as_str() {
                "cl100k_base" => cl100k_base()
                    .map_err(|e| TokenizerError::UnknownModel(format!("cl100k_base: {e}")))?,
                "o200k_base" => o200k_base()
                    .map_err(|e| TokenizerError::UnknownModel(format!("o200k_base: {e}")))?,
                _ => return Err(TokenizerError::UnknownModel(key)),
            },
        };

        let bpe = Arc::new(bpe);
        if let Ok(mut guard) = ENCODERS.lock() {
            guard.entry(key).or_insert_with(|| bpe.clone());
        }
        Ok(Self { bpe })
    }

    /// Number of tokens in `text`.
    #[must_use]
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Encode `text` into token ids.
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_ordinary(text)
    }

    /// Decode token ids back into text.
    pub fn decode(&self, tokens: &[u32]) -> Result<String> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|e| TokenizerError::DecodeError(e.to_string()))
    }

    /// Keep only the last `max_tokens` tokens of `text`.
    ///
    /// Used to bound history from the front: the most recent tokens survive,
    /// the oldest are dropped.
    pub fn tail(&self, text: &str, max_tokens: usize) -> Result<String> {
        let ids = self.bpe.encode_ordinary(text);
        if ids.len() <= max_tokens {
            return Ok(text.to_string());
        }
        let start = ids.len() - max_tokens;
        self.decode(&ids[start..])
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn count_matches_encode_len() {
        let tok = Tokenizer::for_model("gpt-4").unwrap();
        let text = "The quick brown fox jumps over the lazy dog.";
        assert_eq!(tok.count(text), tok.encode(text).len());
    }

    #[test]
    fn encode_decode_round_trips() {
        let tok = Tokenizer::for_model("gpt-4o-mini").unwrap();
        let text = "Paragraph one.\n\nParagraph two with more words.";
        let ids = tok.encode(text);
        assert_eq!(tok.decode(&ids).unwrap(), text);
    }

    #[test]
    fn encoding_names_resolve() {
        assert!(Tokenizer::for_model("cl100k_base").is_ok());
        assert!(Tokenizer::for_model("o200k_base").is_ok());
    }

    #[test]
    fn unknown_model_is_an_error() {
        let err = Tokenizer::for_model("not-a-model").unwrap_err();
        assert!(matches!(err, TokenizerError::UnknownModel(_)));
    }

    #[test]
    fn tail_keeps_most_recent_tokens() {
        let tok = Tokenizer::for_model("gpt-4").unwrap();
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let ids = tok.encode(text);
        assert!(ids.len() > 3);

        let tail = tok.tail(text, 3).unwrap();
        // Token ids map to byte spans of the input, so the decoded token
        // suffix is an exact text suffix.
        assert_eq!(tail, tok.decode(&ids[ids.len() - 3..]).unwrap());
        assert!(text.ends_with(&tail));
        assert!(tail.len() < text.len());
    }

    #[test]
    fn tail_is_identity_when_under_budget() {
        let tok = Tokenizer::for_model("gpt-4").unwrap();
        let text = "short";
        assert_eq!(tok.tail(text, 100).unwrap(), text);
    }

    #[test]
    fn same_model_shares_the_encoder() {
        let a = Tokenizer::for_model("gpt-4").unwrap();
        let b = Tokenizer::for_model("GPT-4").unwrap();
        assert!(Arc::ptr_eq(&a.bpe, &b.bpe));
    }
}
