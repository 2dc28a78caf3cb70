//! Business profile
//!
//! Everything business-specific lives here and is loadable from one YAML
//! file (`config/business.yaml` by default):
//! - company name and currency
//! - vocabulary for entity extraction and language detection
//! - intent keyword sets
//! - sheet ranges per data set
//!
//! Missing sections fall back to the built-in bucket trading profile.

mod intents;
mod sheets;
mod vocabulary;

pub use intents::{IntentKeywords, IntentsConfig};
pub use sheets::SheetRanges;
pub use vocabulary::{TimeframeKeywords, VocabularyConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;
use vyapar_core::BusinessFacts;

use crate::constants::currency;
use crate::ConfigError;

/// Business profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    #[serde(default = "default_company")]
    pub company: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub intents: IntentsConfig,
    #[serde(default)]
    pub sheets: SheetRanges,
}

fn default_company() -> String {
    "Bucket Manufacturing/Trading Business".to_string()
}

fn default_currency() -> String {
    currency::CODE.to_string()
}

fn default_currency_symbol() -> String {
    currency::SYMBOL.to_string()
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            company: default_company(),
            currency: default_currency(),
            currency_symbol: default_currency_symbol(),
            vocabulary: VocabularyConfig::default(),
            intents: IntentsConfig::default(),
            sheets: SheetRanges::default(),
        }
    }
}

impl BusinessProfile {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let profile = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            company = %profile.company,
            products = profile.vocabulary.products.len(),
            "Loaded business profile"
        );
        Ok(profile)
    }

    /// Parse and validate YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let profile: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.company.trim().is_empty() {
            return Err(ConfigError::MissingField("company".to_string()));
        }
        if self.currency_symbol.is_empty() {
            return Err(ConfigError::MissingField("currency_symbol".to_string()));
        }
        if self.vocabulary.products.is_empty() {
            return Err(ConfigError::MissingField("vocabulary.products".to_string()));
        }
        self.intents
            .validate()
            .map_err(|message| ConfigError::InvalidValue {
                field: "intents".to_string(),
                message,
            })?;
        self.sheets
            .validate()
            .map_err(|message| ConfigError::InvalidValue {
                field: "sheets".to_string(),
                message,
            })?;
        Ok(())
    }

    /// Static facts copied into every context bundle
    pub fn business_facts(&self) -> BusinessFacts {
        BusinessFacts {
            company: self.company.clone(),
            products: self.vocabulary.products.clone(),
            warehouses: self.vocabulary.warehouses.clone(),
            accounts: self.vocabulary.accounts.clone(),
            currency: self.currency.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = BusinessProfile::default();
        assert!(profile.validate().is_ok());
        let facts = profile.business_facts();
        assert_eq!(facts.currency, "INR");
        assert_eq!(facts.currency_symbol, "₹");
        assert_eq!(facts.warehouses, vec!["Pallavi", "Tularam"]);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let profile = BusinessProfile::from_yaml_str("{}").unwrap();
        assert_eq!(profile, BusinessProfile::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "company: Test Traders\nvocabulary:\n  products: [\"Drum\"]\nsheets:\n  inventory: \"Stock!A2:D\""
        )
        .unwrap();

        let profile = BusinessProfile::load(file.path()).unwrap();
        assert_eq!(profile.company, "Test Traders");
        assert_eq!(profile.vocabulary.products, vec!["Drum"]);
        assert_eq!(profile.sheets.inventory, "Stock!A2:D");
        assert_eq!(profile.sheets.expenses, "Expense_Income_Journal!A:F");
    }

    #[test]
    fn test_missing_file() {
        let err = BusinessProfile::load("/nonexistent/business.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_invalid_intents_rejected() {
        let yaml = "intents:\n  min_score: 3.0\n";
        let err = BusinessProfile::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
