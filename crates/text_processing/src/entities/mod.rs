//! Business Entity Extraction
//!
//! Pulls business names and figures out of a question:
//! - Products (case-insensitive substring against the catalogue)
//! - Warehouses and accounts (case-sensitive substring)
//! - Timeframes (keyword sets, lower-cased text)
//! - Amounts (optional ₹/Rs/INR prefix, grouped digits, decimals)
//!
//! Substring matching is a heuristic: short catalogue names such as "AL" or
//! "ES" also match inside longer words ("SALES").
//!
//! # Example
//!
//! ```
//! use vyapar_text_processing::entities::EntityExtractor;
//!
//! let extractor = EntityExtractor::default();
//! let entities = extractor.extract("PMR account में ₹1,50,000 है?");
//!
//! assert_eq!(entities.accounts, vec!["PMR"]);
//! assert_eq!(entities.amounts, vec![150000.0]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use vyapar_config::VocabularyConfig;
use vyapar_core::{QueryEntities, Timeframe};

/// Optional currency prefix, digits with `,` grouping, optional decimals
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:₹|\bRs\.?|\bINR)?\s*(\d[\d,]*(?:\.\d+)?)").unwrap()
});

/// Extracts products, places, accounts, timeframes and amounts
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    /// Upper-cased for matching, paired with the display name
    products: Vec<(String, String)>,
    warehouses: Vec<String>,
    accounts: Vec<String>,
    timeframes: Vec<(Timeframe, Vec<String>)>,
}

impl EntityExtractor {
    pub fn new(vocabulary: &VocabularyConfig) -> Self {
        let products = vocabulary
            .product_terms()
            .into_iter()
            .map(|term| (term.to_uppercase(), term))
            .collect();

        let timeframes = Timeframe::ALL
            .into_iter()
            .map(|tf| {
                let keywords = vocabulary
                    .timeframe_keywords(tf)
                    .iter()
                    .map(|k| k.to_lowercase())
                    .collect();
                (tf, keywords)
            })
            .collect();

        Self {
            products,
            warehouses: vocabulary.warehouses.clone(),
            accounts: vocabulary.accounts.clone(),
            timeframes,
        }
    }

    /// Extract all entities. Never fails; no matches yield empty lists.
    pub fn extract(&self, text: &str) -> QueryEntities {
        QueryEntities {
            products: self.extract_products(text),
            warehouses: Self::match_exact(&self.warehouses, text),
            accounts: Self::match_exact(&self.accounts, text),
            timeframes: self.extract_timeframes(text),
            amounts: Self::extract_amounts(text),
        }
    }

    pub fn extract_products(&self, text: &str) -> Vec<String> {
        let upper = text.to_uppercase();
        self.products
            .iter()
            .filter(|(needle, _)| upper.contains(needle.as_str()))
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Timeframes in fixed order: today, week, month, year
    pub fn extract_timeframes(&self, text: &str) -> Vec<Timeframe> {
        let lower = text.to_lowercase();
        self.timeframes
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|(tf, _)| *tf)
            .collect()
    }

    /// Numeric amounts, de-duplicated by value keeping the first occurrence
    pub fn extract_amounts(text: &str) -> Vec<f64> {
        let mut amounts: Vec<f64> = Vec::new();
        for caps in AMOUNT_PATTERN.captures_iter(text) {
            let Some(digits) = caps.get(1) else {
                continue;
            };
            let cleaned: String = digits.as_str().chars().filter(|c| *c != ',').collect();
            let Ok(value) = cleaned.parse::<f64>() else {
                continue;
            };
            if !amounts.contains(&value) {
                amounts.push(value);
            }
        }
        amounts
    }

    fn match_exact(vocabulary: &[String], text: &str) -> Vec<String> {
        vocabulary
            .iter()
            .filter(|term| text.contains(term.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(&VocabularyConfig::default())
    }
}
