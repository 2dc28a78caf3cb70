//! Generative model integration
//!
//! Features:
//! - Claude Messages API backend implementing [`vyapar_core::LanguageModel`]
//! - Prompt template rendering a context bundle into the system prompt

pub mod claude;
pub mod prompt;

pub use claude::{resolve_model, ClaudeBackend, ClaudeConfig};
pub use prompt::{role_preamble, PromptBuilder};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for vyapar_core::Error {
    fn from(err: LlmError) -> Self {
        vyapar_core::Error::LanguageModel(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vyapar_core::FailureBoundary;

    #[test]
    fn test_llm_error_boundary() {
        let err: vyapar_core::Error = LlmError::Timeout.into();
        assert_eq!(err.boundary(), FailureBoundary::AssistantService);
    }
}
