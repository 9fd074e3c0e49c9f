use docbot_tokenizer::Tokenizer;
use docbot_vector_store::RetrievedHit;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Caps applied while assembling the context window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblerConfig {
    /// Token budget for the whole context window
    pub max_tokens: usize,

    /// Per-passage character cap; longer hit texts are truncated
    pub max_chunk_length: usize,

    /// Maximum passages accepted from any one document
    pub max_per_source: usize,

    /// Keep passages whose normalized text was already accepted
    pub allow_duplicates: bool,

    /// Drop truncated passages shorter than this many characters
    pub min_chunk_chars: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            max_tokens: 6500,
            max_chunk_length: 2000,
            max_per_source: 4,
            allow_duplicates: false,
            min_chunk_chars: 0,
        }
    }
}

impl AssemblerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be > 0".to_string());
        }
        if self.max_chunk_length == 0 {
            return Err("max_chunk_length must be > 0".to_string());
        }
        if self.max_per_source == 0 {
            return Err("max_per_source must be > 0".to_string());
        }
        Ok(())
    }
}

/// One passage of the final context window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextChunk {
    /// Passage text, truncated and trimmed
    pub text: String,

    /// Document the passage came from
    pub source: String,

    /// Page within the document
    pub page: u32,
}

/// Assemble the bounded context window from ranked hits.
///
/// One greedy pass in ranked order. Per hit: skip once its document already
/// contributed `max_per_source` passages; truncate to `max_chunk_length`
/// characters and trim; skip duplicates by normalized (lowercased) text
/// unless `allow_duplicates`; and stop the whole assembly the moment a
/// passage would push the running token total past `max_tokens`. The hard
/// stop keeps the output a rank-prefix of what fits, so a higher-ranked
/// cheap passage is never displaced by a later expensive one.
///
/// An empty result means "no usable context" and is a legitimate outcome
/// the caller must handle distinctly.
#[must_use]
pub fn assemble(
    tokenizer: &Tokenizer,
    hits: &[RetrievedHit],
    config: &AssemblerConfig,
) -> Vec<ContextChunk> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut source_counts: HashMap<&str, usize> = HashMap::new();
    let mut total_tokens = 0usize;
    let mut context = Vec::new();

    for hit in hits {
        if source_counts.get(hit.source.as_str()).copied().unwrap_or(0) >= config.max_per_source {
            continue;
        }

        let text = truncate_chars(&hit.text, config.max_chunk_length)
            .trim()
            .to_string();
        if config.min_chunk_chars > 0 && text.chars().count() < config.min_chunk_chars {
            continue;
        }

        let normalized = text.to_lowercase();
        if !config.allow_duplicates && seen.contains(&normalized) {
            continue;
        }

        let tokens = tokenizer.count(&text);
        if total_tokens + tokens > config.max_tokens {
            break;
        }

        seen.insert(normalized);
        total_tokens += tokens;
        *source_counts.entry(hit.source.as_str()).or_insert(0) += 1;
        context.push(ContextChunk {
            text,
            source: hit.source.clone(),
            page: hit.page,
        });
    }

    log::debug!(
        "Assembled {} context chunks ({total_tokens} tokens)",
        context.len()
    );
    context
}

/// First `max_chars` characters of `text`, on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
