//! Core traits and types for the business query assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Query types (raw query, intent, entities, classification)
//! - Data sets, raw tables, and normalized records
//! - The context bundle handed to the generative model
//! - Collaborator traits (data store, language model)
//! - Error types

pub mod bundle;
pub mod data;
pub mod error;
pub mod language;
pub mod llm_types;
pub mod query;
pub mod records;
pub mod traits;

pub use bundle::{
    Analysis, BundleData, BundleQuery, BusinessFacts, ContextBundle, DataSummary,
    InstructionFlags,
};
pub use data::{raw_table, DataSet, RawTable, TableSet};
pub use error::{Error, FailureBoundary, Result};
pub use language::{is_devanagari_char, Language};
pub use llm_types::{GenerateRequest, GenerateResponse, TokenUsage};
pub use query::{QueryContext, QueryEntities, QueryIntent, RawQuery, Timeframe};
pub use records::{
    InventoryRecord, LedgerRecord, NormalizedData, NormalizedRecord, TransactionRecord,
};
pub use traits::{DataStore, LanguageModel};
