//! Query Analysis for the Business Assistant
//!
//! This crate turns a question into a [`vyapar_core::QueryContext`]:
//! - **Language Detection**: English, Hindi or Marathi by script and marker words
//! - **Intent Classification**: weighted bilingual keyword sets
//! - **Entity Extraction**: products, warehouses, accounts, timeframes, amounts
//!
//! All stages are pure, synchronous and driven by the
//! [`vyapar_config::BusinessProfile`] vocabulary.
//!
//! # Example
//!
//! ```
//! use vyapar_core::{QueryIntent, RawQuery};
//! use vyapar_text_processing::QueryAnalyzer;
//!
//! let analyzer = QueryAnalyzer::default();
//! let context = analyzer.analyze(&RawQuery::new("current stock status").unwrap());
//!
//! assert_eq!(context.intent, QueryIntent::InventoryCheck);
//! ```

pub mod entities;
pub mod intent;
pub mod language;

mod analyzer;

pub use analyzer::{Analyzed, QueryAnalyzer};
pub use entities::EntityExtractor;
pub use intent::{Classification, IntentClassifier};
pub use language::LanguageDetector;
