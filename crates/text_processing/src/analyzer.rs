//! Query analysis
//!
//! Runs language detection, intent classification and entity extraction over
//! one question and combines them into a [`QueryContext`]. Pure and
//! synchronous; no stage can fail.

use vyapar_config::BusinessProfile;
use vyapar_core::{QueryContext, RawQuery};

use crate::entities::EntityExtractor;
use crate::intent::{Classification, IntentClassifier};
use crate::language::LanguageDetector;

/// Combined analysis with classifier diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Analyzed {
    pub context: QueryContext,
    pub classification: Classification,
}

#[derive(Debug, Clone)]
pub struct QueryAnalyzer {
    language: LanguageDetector,
    intent: IntentClassifier,
    entities: EntityExtractor,
}

impl QueryAnalyzer {
    pub fn new(profile: &BusinessProfile) -> Self {
        Self {
            language: LanguageDetector::from_vocabulary(&profile.vocabulary),
            intent: IntentClassifier::new(profile.intents.clone()),
            entities: EntityExtractor::new(&profile.vocabulary),
        }
    }

    pub fn analyze(&self, query: &RawQuery) -> QueryContext {
        self.analyze_detailed(query).context
    }

    pub fn analyze_detailed(&self, query: &RawQuery) -> Analyzed {
        let language = self.language.detect(&query.text);
        let classification = self.intent.classify(&query.lowercase());
        let entities = self.entities.extract(&query.text);

        tracing::debug!(
            request_id = %query.request_id,
            language = %language,
            intent = %classification.intent,
            confidence = classification.confidence,
            products = entities.products.len(),
            timeframes = entities.timeframes.len(),
            "Analyzed query"
        );

        let context = QueryContext {
            language,
            intent: classification.intent,
            timeframe: entities.timeframes.clone(),
            entities,
            confidence: classification.confidence,
        };

        Analyzed {
            context,
            classification,
        }
    }

    pub fn language_detector(&self) -> &LanguageDetector {
        &self.language
    }

    pub fn intent_classifier(&self) -> &IntentClassifier {
        &self.intent
    }

    pub fn entity_extractor(&self) -> &EntityExtractor {
        &self.entities
    }
}

impl Default for QueryAnalyzer {
    fn default() -> Self {
        Self::new(&BusinessProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vyapar_core::{Language, QueryIntent, Timeframe};

    fn analyze(text: &str) -> QueryContext {
        QueryAnalyzer::default().analyze(&RawQuery::new(text).unwrap())
    }

    #[test]
    fn test_hindi_monthly_sales() {
        let ctx = analyze("इस महीने कितनी sales हुई?");
        assert_eq!(ctx.language, Language::Hindi);
        assert_eq!(ctx.intent, QueryIntent::SalesInquiry);
        assert_eq!(ctx.timeframe, vec![Timeframe::Month]);
        assert_eq!(ctx.entities.timeframes, ctx.timeframe);
    }

    #[test]
    fn test_english_stock_status() {
        let ctx = analyze("current stock status");
        assert_eq!(ctx.language, Language::English);
        assert_eq!(ctx.intent, QueryIntent::InventoryCheck);
        assert!(ctx.confidence > 0.0);
    }

    #[test]
    fn test_account_balance() {
        let ctx = analyze("PMR account में कितना पैसा है?");
        assert_eq!(ctx.language, Language::Hindi);
        assert_eq!(ctx.entities.accounts, vec!["PMR"]);
    }

    #[test]
    fn test_unmatched_question() {
        let ctx = analyze("hello");
        assert_eq!(ctx.intent, QueryIntent::GeneralInquiry);
        assert_eq!(ctx.confidence, 0.0);
        assert!(ctx.timeframe.is_empty());
    }

    #[test]
    fn test_custom_profile() {
        let yaml = r#"
vocabulary:
  accounts: ["HDFC Current"]
"#;
        let profile = BusinessProfile::from_yaml_str(yaml).unwrap();
        let analyzer = QueryAnalyzer::new(&profile);
        let ctx = analyzer.analyze(&RawQuery::new("balance in HDFC Current").unwrap());
        assert_eq!(ctx.entities.accounts, vec!["HDFC Current"]);
    }
}
