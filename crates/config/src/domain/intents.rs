//! Intent Configuration
//!
//! Weighted keyword sets for intent classification. Score for an intent is
//! `matched / keyword_count * weight`; the highest score wins, ties go to the
//! intent listed first in `priority`.

use serde::{Deserialize, Serialize};
use vyapar_core::QueryIntent;

use crate::constants::classification::MIN_INTENT_SCORE;

/// Keyword set for one intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentKeywords {
    pub intent: QueryIntent,
    /// Category weight applied to the match ratio
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Lower-case keywords, English and Devanagari
    pub keywords: Vec<String>,
}

fn default_weight() -> f32 {
    1.0
}

/// Intents configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentsConfig {
    #[serde(default = "default_intent_keywords")]
    pub intents: Vec<IntentKeywords>,
    /// Tie-break order, highest priority first
    #[serde(default = "default_priority")]
    pub priority: Vec<QueryIntent>,
    /// Best scores below this classify as general_inquiry
    #[serde(default = "default_min_score")]
    pub min_score: f32,
}

fn default_min_score() -> f32 {
    MIN_INTENT_SCORE
}

impl Default for IntentsConfig {
    fn default() -> Self {
        Self {
            intents: default_intent_keywords(),
            priority: default_priority(),
            min_score: default_min_score(),
        }
    }
}

impl IntentsConfig {
    /// Keyword set for an intent
    pub fn keywords_for(&self, intent: QueryIntent) -> Option<&IntentKeywords> {
        self.intents.iter().find(|k| k.intent == intent)
    }

    /// Position of an intent in the tie-break order (lower wins)
    pub fn priority_rank(&self, intent: QueryIntent) -> usize {
        self.priority
            .iter()
            .position(|p| *p == intent)
            .unwrap_or(self.priority.len())
    }

    /// Check weights, keyword sets and the priority list
    pub fn validate(&self) -> Result<(), String> {
        if self.intents.is_empty() {
            return Err("at least one intent keyword set is required".to_string());
        }
        for set in &self.intents {
            if set.intent == QueryIntent::GeneralInquiry {
                return Err("general_inquiry is the fallback and cannot have keywords".to_string());
            }
            if set.keywords.is_empty() {
                return Err(format!("{} has an empty keyword set", set.intent));
            }
            if !(set.weight > 0.0) {
                return Err(format!("{} weight must be positive, got {}", set.intent, set.weight));
            }
            if set.keywords.iter().any(|k| k.to_lowercase() != *k) {
                return Err(format!("{} keywords must be lower-case", set.intent));
            }
        }
        for set in &self.intents {
            if self.intents.iter().filter(|s| s.intent == set.intent).count() > 1 {
                return Err(format!("{} is configured twice", set.intent));
            }
            if !self.priority.contains(&set.intent) {
                return Err(format!("{} is missing from the priority list", set.intent));
            }
        }
        if self.priority.len() != self.intents.len() {
            return Err("priority list must name each scored intent exactly once".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(format!("min_score must be within [0, 1], got {}", self.min_score));
        }
        Ok(())
    }
}

fn keywords(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_intent_keywords() -> Vec<IntentKeywords> {
    vec![
        IntentKeywords {
            intent: QueryIntent::SalesInquiry,
            weight: 1.2,
            keywords: keywords(&[
                "sales", "sell", "sold", "revenue", "income", "earning", "बिक्री", "बेचा", "कमाई",
                "विक्री",
            ]),
        },
        IntentKeywords {
            intent: QueryIntent::InventoryCheck,
            weight: 1.2,
            keywords: keywords(&[
                "stock", "inventory", "warehouse", "bucket", "product", "स्टॉक", "माल", "भंडार",
            ]),
        },
        IntentKeywords {
            intent: QueryIntent::CustomerAnalysis,
            weight: 1.0,
            keywords: keywords(&["customer", "buyer", "client", "ग्राहक", "खरीदार", "कस्टमर"]),
        },
        IntentKeywords {
            intent: QueryIntent::FinancialAnalysis,
            weight: 1.0,
            keywords: keywords(&[
                "profit", "expense", "cost", "financial", "money", "cash", "मुनाफा", "खर्च", "पैसा",
            ]),
        },
        // Generic words; a single hit should not outrank a domain keyword
        IntentKeywords {
            intent: QueryIntent::StatusCheck,
            weight: 0.4,
            keywords: keywords(&["status", "current", "now", "today", "अभी", "आज", "हाल"]),
        },
    ]
}

fn default_priority() -> Vec<QueryIntent> {
    vec![
        QueryIntent::InventoryCheck,
        QueryIntent::SalesInquiry,
        QueryIntent::FinancialAnalysis,
        QueryIntent::CustomerAnalysis,
        QueryIntent::StatusCheck,
    ]
}
