//! Business Query Assistant
//!
//! Features:
//! - Query pipeline: classify, route, fetch, normalize, assemble
//! - Single fallback to a full unfiltered fetch when the targeted path fails
//! - Assistant facade that sends the context bundle to the generative model
//! - Tracing setup and pipeline counters
//!
//! # Example
//!
//! ```ignore
//! let settings = vyapar_config::load_settings(Some("production"))?;
//! vyapar_agent::telemetry::init_tracing(&settings.observability)?;
//!
//! let assistant = BusinessAssistant::from_settings(&settings)?;
//! let reply = assistant.ask("इस महीने कितनी sales हुई?").await?;
//! println!("{}", reply.answer);
//! ```

pub mod assistant;
pub mod context;
pub mod normalizer;
pub mod pipeline;
pub mod router;
pub mod telemetry;
pub mod traits;

pub use assistant::{AssistantReply, BusinessAssistant, DataUsed, ReplyMetadata};
pub use context::ContextAssembler;
pub use normalizer::{normalize, Normalized};
pub use pipeline::{PipelineState, PipelineTrace, QueryPipeline};
pub use router::route;
pub use traits::Assistant;

use thiserror::Error;
use vyapar_core::FailureBoundary;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Query text is empty")]
    EmptyInput,

    /// Both the targeted fetch and the full fallback fetch failed
    #[error("Business data unavailable: {primary}; fallback fetch failed: {fallback}")]
    FallbackFailed { primary: String, fallback: String },

    #[error("Assistant service error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    /// Which boundary failed, for picking a user-facing message
    pub fn boundary(&self) -> FailureBoundary {
        match self {
            Self::EmptyInput => FailureBoundary::UserInput,
            Self::FallbackFailed { .. } => FailureBoundary::DataAccess,
            Self::Model(_) => FailureBoundary::AssistantService,
            Self::Configuration(_) => FailureBoundary::Configuration,
        }
    }
}

impl From<vyapar_config::ConfigError> for AgentError {
    fn from(err: vyapar_config::ConfigError) -> Self {
        AgentError::Configuration(err.to_string())
    }
}

impl From<vyapar_llm::LlmError> for AgentError {
    fn from(err: vyapar_llm::LlmError) -> Self {
        AgentError::Model(err.to_string())
    }
}

impl From<vyapar_sheets::SheetsError> for AgentError {
    fn from(err: vyapar_sheets::SheetsError) -> Self {
        AgentError::Configuration(format!("data store: {}", err))
    }
}
