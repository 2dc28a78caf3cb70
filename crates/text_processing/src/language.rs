//! Language detection
//!
//! Script-based: any Devanagari character means Hindi or Marathi, decided by
//! the presence of a Marathi-only function word. Everything else is English.

use unicode_segmentation::UnicodeSegmentation;
use vyapar_config::VocabularyConfig;
use vyapar_core::{is_devanagari_char, Language};

/// Detects the response language of a question
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    marathi_markers: Vec<String>,
}

impl LanguageDetector {
    pub fn new(marathi_markers: Vec<String>) -> Self {
        Self { marathi_markers }
    }

    pub fn from_vocabulary(vocabulary: &VocabularyConfig) -> Self {
        Self::new(vocabulary.marathi_markers.clone())
    }

    /// Detect the language of `text`. Never fails; empty text is English.
    pub fn detect(&self, text: &str) -> Language {
        if !text.chars().any(is_devanagari_char) {
            return Language::English;
        }

        if self.has_marathi_marker(text) {
            Language::Marathi
        } else {
            Language::Hindi
        }
    }

    /// Whole-word match so a marker inside a longer token does not count
    fn has_marathi_marker(&self, text: &str) -> bool {
        text.unicode_words()
            .any(|word| self.marathi_markers.iter().any(|m| m == word))
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::from_vocabulary(&VocabularyConfig::default())
    }
}
