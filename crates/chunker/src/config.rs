use serde::{Deserialize, Serialize};

/// Configuration for document chunking
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum chunk size in tokens (hard limit, except for single
    /// paragraphs that alone exceed it)
    pub max_tokens: usize,

    /// Tokens repeated from the end of one chunk at the start of the next
    pub overlap_tokens: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            overlap_tokens: 50,
        }
    }
}

impl ChunkerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be > 0".to_string());
        }

        if self.overlap_tokens >= self.max_tokens {
            return Err(format!(
                "overlap_tokens ({}) must be smaller than max_tokens ({})",
                self.overlap_tokens, self.max_tokens
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ChunkerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = ChunkerConfig {
            max_tokens: 0,
            overlap_tokens: 0,
        };
        assert!(config.validate().is_err());

        let config = ChunkerConfig {
            max_tokens: 100,
            overlap_tokens: 100,
        };
        assert!(config.validate().is_err());

        let config = ChunkerConfig {
            max_tokens: 100,
            overlap_tokens: 20,
        };
        assert!(config.validate().is_ok());
    }
}
