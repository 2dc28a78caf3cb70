//! Intent Classification
//!
//! Keyword-ratio classifier over the business intents. Each intent carries a
//! bilingual keyword set and a weight:
//!
//! ```text
//! score(intent) = matched_keywords / keyword_set_size * weight
//! ```
//!
//! The best score wins; equal scores resolve by the configured priority
//! order. A best score under the threshold yields `general_inquiry` with
//! confidence 0.
//!
//! # Example
//!
//! ```
//! use vyapar_core::QueryIntent;
//! use vyapar_text_processing::intent::IntentClassifier;
//!
//! let classifier = IntentClassifier::default();
//! let result = classifier.classify("current stock status");
//!
//! assert_eq!(result.intent, QueryIntent::InventoryCheck);
//! ```

use serde::{Deserialize, Serialize};
use vyapar_config::{IntentKeywords, IntentsConfig};
use vyapar_core::QueryIntent;

/// Classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: QueryIntent,
    /// Winning score clamped to [0, 1]; 0 for `general_inquiry`
    pub confidence: f32,
    /// Remaining scored intents, best first
    pub alternatives: Vec<(QueryIntent, f32)>,
}

impl Classification {
    fn unclassified(alternatives: Vec<(QueryIntent, f32)>) -> Self {
        Self {
            intent: QueryIntent::GeneralInquiry,
            confidence: 0.0,
            alternatives,
        }
    }
}

/// Keyword-based intent classifier
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    config: IntentsConfig,
}

impl IntentClassifier {
    pub fn new(config: IntentsConfig) -> Self {
        Self { config }
    }

    /// Classify a question. Input is lower-cased here, callers may pass raw text.
    pub fn classify(&self, text: &str) -> Classification {
        let text_lower = text.to_lowercase();

        let mut scores: Vec<(QueryIntent, f32)> = self
            .config
            .intents
            .iter()
            .map(|set| (set.intent, Self::score(&text_lower, set)))
            .collect();

        scores.sort_by(|a, b| {
            b.1.total_cmp(&a.1).then_with(|| {
                self.config
                    .priority_rank(a.0)
                    .cmp(&self.config.priority_rank(b.0))
            })
        });

        let Some(&(best_intent, best_score)) = scores.first() else {
            return Classification::unclassified(Vec::new());
        };

        if best_score < self.config.min_score {
            tracing::debug!(best_score, "No intent above threshold");
            return Classification::unclassified(scores);
        }

        Classification {
            intent: best_intent,
            confidence: best_score.clamp(0.0, 1.0),
            alternatives: scores.into_iter().skip(1).collect(),
        }
    }

    /// Substring match of each keyword against lower-cased text
    fn score(text_lower: &str, set: &IntentKeywords) -> f32 {
        if set.keywords.is_empty() {
            return 0.0;
        }
        let matched = set
            .keywords
            .iter()
            .filter(|keyword| text_lower.contains(keyword.as_str()))
            .count();
        matched as f32 / set.keywords.len() as f32 * set.weight
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(IntentsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::default()
    }

    #[test]
    fn test_stock_beats_status() {
        let result = classifier().classify("current stock status");
        assert_eq!(result.intent, QueryIntent::InventoryCheck);
        assert!((result.confidence - 0.15).abs() < 1e-4);
        assert_eq!(result.alternatives[0].0, QueryIntent::StatusCheck);
    }

    #[test]
    fn test_hindi_sales() {
        let result = classifier().classify("इस महीने कितनी sales हुई?");
        assert_eq!(result.intent, QueryIntent::SalesInquiry);
        assert!((result.confidence - 0.12).abs() < 1e-4);
    }

    #[test]
    fn test_hindi_money() {
        let result = classifier().classify("PMR account में कितना पैसा है?");
        assert_eq!(result.intent, QueryIntent::FinancialAnalysis);
    }

    #[test]
    fn test_customer() {
        let result = classifier().classify("Which customer bought the most?");
        assert_eq!(result.intent, QueryIntent::CustomerAnalysis);
    }

    #[test]
    fn test_no_keywords_is_general_inquiry() {
        let result = classifier().classify("hello there");
        assert_eq!(result.intent, QueryIntent::GeneralInquiry);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_below_threshold_is_general_inquiry() {
        // one status keyword: 1/7 * 0.4 < 0.1
        let result = classifier().classify("what is it now");
        assert_eq!(result.intent, QueryIntent::GeneralInquiry);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_tie_breaks_by_priority() {
        // sales 1/10 * 1.2 == 0.12; build a config where inventory ties exactly
        let mut config = IntentsConfig::default();
        for set in &mut config.intents {
            if set.intent == QueryIntent::InventoryCheck {
                set.keywords = (0..10).map(|i| format!("kw{}", i)).collect();
                set.keywords[0] = "stock".into();
            }
        }
        let classifier = IntentClassifier::new(config);
        let result = classifier.classify("stock sales");
        assert_eq!(result.intent, QueryIntent::InventoryCheck);
        assert_eq!(result.alternatives[0].0, QueryIntent::SalesInquiry);
    }

    #[test]
    fn test_pure() {
        let c = classifier();
        let text = "How much profit and cash this year?";
        assert_eq!(c.classify(text), c.classify(text));
    }

    #[test]
    fn test_confidence_clamped() {
        let mut config = IntentsConfig::default();
        config.intents[0].weight = 5.0;
        let classifier = IntentClassifier::new(config);
        let result = classifier.classify("sales sell sold revenue");
        assert_eq!(result.intent, QueryIntent::SalesInquiry);
        assert_eq!(result.confidence, 1.0);
    }
}
