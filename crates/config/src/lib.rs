//! Configuration management for the business query assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (`VYAPAR__` prefix, `__` section separator)
//!
//! # Business Profile
//!
//! Business-specific data (company, vocabulary, intent keywords, sheet
//! ranges) lives in [`BusinessProfile`], loadable from a single YAML file.
//! The built-in default describes the bucket trading business.

pub mod constants;
pub mod domain;
pub mod settings;

pub use domain::{
    BusinessProfile, IntentKeywords, IntentsConfig, SheetRanges, TimeframeKeywords,
    VocabularyConfig,
};
pub use settings::{
    load_settings, load_settings_from, LlmConfig, ObservabilityConfig, RuntimeEnvironment,
    Settings, SheetsConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for vyapar_core::Error {
    fn from(err: ConfigError) -> Self {
        vyapar_core::Error::Config(err.to_string())
    }
}
