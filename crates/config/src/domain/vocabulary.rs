//! Business vocabulary
//!
//! Product catalogue, warehouse and account names, timeframe keywords and
//! Marathi marker words. Defaults describe the bucket trading business;
//! a profile YAML can replace any list.

use serde::{Deserialize, Serialize};
use vyapar_core::Timeframe;

/// Keywords that signal one timeframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeKeywords {
    pub timeframe: Timeframe,
    pub keywords: Vec<String>,
}

/// Vocabulary used by entity extraction and language detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Product catalogue, as named in the sheets
    #[serde(default = "default_products")]
    pub products: Vec<String>,
    /// Family names matched in addition to the catalogue (e.g. "TATA")
    #[serde(default = "default_product_families")]
    pub product_families: Vec<String>,
    #[serde(default = "default_warehouses")]
    pub warehouses: Vec<String>,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<String>,
    #[serde(default = "default_timeframes")]
    pub timeframes: Vec<TimeframeKeywords>,
    /// Function words that only occur in Marathi
    #[serde(default = "default_marathi_markers")]
    pub marathi_markers: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            products: default_products(),
            product_families: default_product_families(),
            warehouses: default_warehouses(),
            accounts: default_accounts(),
            timeframes: default_timeframes(),
            marathi_markers: default_marathi_markers(),
        }
    }
}

impl VocabularyConfig {
    /// Terms used for product matching
    ///
    /// Catalogue order, with each family placed right after the last product
    /// it prefixes. Families without a member go at the end.
    pub fn product_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> =
            Vec::with_capacity(self.products.len() + self.product_families.len());
        let mut trailing = Vec::new();

        for family in &self.product_families {
            if self.products.contains(family) {
                continue;
            }
            let prefix = family.to_uppercase();
            let has_member = self
                .products
                .iter()
                .any(|p| p.to_uppercase().starts_with(&prefix));
            if !has_member && !trailing.contains(family) {
                trailing.push(family.clone());
            }
        }

        for (i, product) in self.products.iter().enumerate() {
            if !terms.contains(product) {
                terms.push(product.clone());
            }
            let rest = &self.products[i + 1..];
            for family in &self.product_families {
                let prefix = family.to_uppercase();
                let last_member = product.to_uppercase().starts_with(&prefix)
                    && !rest.iter().any(|p| p.to_uppercase().starts_with(&prefix));
                if last_member && !terms.contains(family) {
                    terms.push(family.clone());
                }
            }
        }

        for family in trailing {
            if !terms.contains(&family) {
                terms.push(family);
            }
        }
        terms
    }

    /// Keywords for a timeframe (empty if not configured)
    pub fn timeframe_keywords(&self, timeframe: Timeframe) -> &[String] {
        self.timeframes
            .iter()
            .find(|t| t.timeframe == timeframe)
            .map(|t| t.keywords.as_slice())
            .unwrap_or(&[])
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_products() -> Vec<String> {
    strings(&[
        "TATA G",
        "TATA W",
        "TATA 10 Ltr",
        "AL 10 ltr",
        "AL",
        "BB",
        "ES",
        "MH",
        "IBC tank",
    ])
}

fn default_product_families() -> Vec<String> {
    strings(&["TATA"])
}

fn default_warehouses() -> Vec<String> {
    strings(&["Pallavi", "Tularam"])
}

fn default_accounts() -> Vec<String> {
    strings(&["Prashant Gaydhane", "PMR", "KPG Saving", "KP Enterprices", "Cash"])
}

fn default_timeframes() -> Vec<TimeframeKeywords> {
    vec![
        TimeframeKeywords {
            timeframe: Timeframe::Today,
            keywords: strings(&["today", "आज"]),
        },
        TimeframeKeywords {
            timeframe: Timeframe::Week,
            keywords: strings(&["week", "सप्ताह", "हफ्ता", "हफ्ते"]),
        },
        TimeframeKeywords {
            timeframe: Timeframe::Month,
            keywords: strings(&["month", "महीना", "महिना", "महीने"]),
        },
        TimeframeKeywords {
            timeframe: Timeframe::Year,
            keywords: strings(&["year", "साल", "वर्ष"]),
        },
    ]
}

fn default_marathi_markers() -> Vec<String> {
    strings(&["आहे", "काय", "कसे", "कधी", "कुठे", "आहेत", "नाही"])
}
