//! Error types shared across crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which boundary a failure crossed
///
/// Callers use this to pick a user-facing message; the core never renders one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureBoundary {
    /// The question itself was rejected
    UserInput,
    /// The data store could not be read
    DataAccess,
    /// The generative model could not answer
    AssistantService,
    /// The process was misconfigured
    Configuration,
}

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Query text is empty")]
    EmptyInput,

    #[error("Data store error: {0}")]
    DataStore(String),

    #[error("Language model error: {0}")]
    LanguageModel(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn data_store(message: impl Into<String>) -> Self {
        Self::DataStore(message.into())
    }

    pub fn language_model(message: impl Into<String>) -> Self {
        Self::LanguageModel(message.into())
    }

    pub fn boundary(&self) -> FailureBoundary {
        match self {
            Self::EmptyInput => FailureBoundary::UserInput,
            Self::DataStore(_) => FailureBoundary::DataAccess,
            Self::LanguageModel(_) => FailureBoundary::AssistantService,
            Self::Config(_) => FailureBoundary::Configuration,
        }
    }
}

/// Result alias using the core error
pub type Result<T> = std::result::Result<T, Error>;
