//! Query languages
//!
//! Business owners ask in Hindi, Marathi, English, or a mix of Latin and
//! Devanagari script. Only these three are distinguished.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detected query language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Marathi];

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Marathi => "mr",
        }
    }

    /// Lower-case label, as it appears in the context bundle
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Marathi => "marathi",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Marathi => "Marathi",
        }
    }

    /// Whether the language is written in Devanagari
    pub fn is_devanagari(&self) -> bool {
        matches!(self, Self::Hindi | Self::Marathi)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a character falls in the Devanagari block (U+0900..=U+097F)
pub fn is_devanagari_char(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_labels() {
        assert_eq!(Language::Hindi.as_str(), "hindi");
        assert_eq!(Language::Marathi.code(), "mr");
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::English.to_string(), "english");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Language::Marathi).unwrap();
        assert_eq!(json, "\"marathi\"");
        let lang: Language = serde_json::from_str("\"hindi\"").unwrap();
        assert_eq!(lang, Language::Hindi);
    }

    #[test]
    fn test_devanagari_char() {
        assert!(is_devanagari_char('क'));
        assert!(is_devanagari_char('०'));
        assert!(!is_devanagari_char('k'));
        assert!(!is_devanagari_char('₹'));
    }
}
