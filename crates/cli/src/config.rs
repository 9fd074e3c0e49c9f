use std::env;

/// OpenAI-compatible endpoint settings, read from the environment.
///
/// The environment is consumed only here at the CLI boundary; the engine
/// and the library crates receive everything as explicit parameters.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key; absent means no completion client and stub-only embeddings
    pub api_key: Option<String>,

    /// Endpoint base URL
    pub base_url: String,

    /// Chat model identifier
    pub chat_model: String,
}

impl OpenAiConfig {
    /// Read configuration from `OPENAI_API_KEY`, `OPENAI_BASE_URL`, and
    /// `DOCBOT_CHAT_MODEL`.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            chat_model: env::var("DOCBOT_CHAT_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }
}
