//! Query types: the raw request and its classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{Error, Language, Result};

/// A user question as received, before any analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuery {
    /// Request identifier, only used to correlate log lines
    pub request_id: Uuid,
    /// Question text, verbatim
    pub text: String,
    /// When the question arrived
    pub received_at: DateTime<Utc>,
}

impl RawQuery {
    /// Accept a question, rejecting blank input
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self {
            request_id: Uuid::new_v4(),
            text,
            received_at: Utc::now(),
        })
    }

    /// Lower-cased copy of the text, used by keyword matching
    pub fn lowercase(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Kind of business question asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    SalesInquiry,
    InventoryCheck,
    CustomerAnalysis,
    FinancialAnalysis,
    StatusCheck,
    #[default]
    GeneralInquiry,
}

impl QueryIntent {
    /// Intents that carry a keyword set; `GeneralInquiry` is the fallback label
    pub const SCORED: [QueryIntent; 5] = [
        QueryIntent::SalesInquiry,
        QueryIntent::InventoryCheck,
        QueryIntent::CustomerAnalysis,
        QueryIntent::FinancialAnalysis,
        QueryIntent::StatusCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalesInquiry => "sales_inquiry",
            Self::InventoryCheck => "inventory_check",
            Self::CustomerAnalysis => "customer_analysis",
            Self::FinancialAnalysis => "financial_analysis",
            Self::StatusCheck => "status_check",
            Self::GeneralInquiry => "general_inquiry",
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative period mentioned in a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Today,
    Week,
    Month,
    Year,
}

impl Timeframe {
    /// Fixed output order for extracted timeframes
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Today,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities recognized in a question
///
/// Every list is free of duplicates and ordered by vocabulary position
/// (amounts by first occurrence in the text).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEntities {
    pub products: Vec<String>,
    pub warehouses: Vec<String>,
    pub accounts: Vec<String>,
    pub timeframes: Vec<Timeframe>,
    pub amounts: Vec<f64>,
}

impl QueryEntities {
    /// Check if nothing was recognized
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.warehouses.is_empty()
            && self.accounts.is_empty()
            && self.timeframes.is_empty()
            && self.amounts.is_empty()
    }
}

/// Classification of a question; a pure function of its text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryContext {
    pub language: Language,
    pub intent: QueryIntent,
    pub entities: QueryEntities,
    pub timeframe: Vec<Timeframe>,
    /// Intent confidence in [0, 1]
    pub confidence: f32,
}

impl QueryContext {
    /// Classification used when the targeted path failed
    pub fn fallback() -> Self {
        Self {
            language: Language::English,
            intent: QueryIntent::GeneralInquiry,
            entities: QueryEntities::default(),
            timeframe: Vec::new(),
            confidence: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_query_rejects_blank() {
        assert!(matches!(RawQuery::new("   \n\t"), Err(Error::EmptyInput)));
        assert!(matches!(RawQuery::new(""), Err(Error::EmptyInput)));

        let query = RawQuery::new("Current STOCK").unwrap();
        assert_eq!(query.text, "Current STOCK");
        assert_eq!(query.lowercase(), "current stock");
    }

    #[test]
    fn test_intent_labels() {
        assert_eq!(QueryIntent::SalesInquiry.as_str(), "sales_inquiry");
        let json = serde_json::to_string(&QueryIntent::InventoryCheck).unwrap();
        assert_eq!(json, "\"inventory_check\"");
        assert!(!QueryIntent::SCORED.contains(&QueryIntent::GeneralInquiry));
    }

    #[test]
    fn test_fallback_context() {
        let ctx = QueryContext::fallback();
        assert_eq!(ctx.intent, QueryIntent::GeneralInquiry);
        assert_eq!(ctx.language, Language::English);
        assert!(ctx.entities.is_empty());
    }
}
