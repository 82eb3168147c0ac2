//! Intent classification using ordered keyword sets.
//!
//! Categories are checked in priority order and the first one containing a
//! keyword wins: emergency > symptom > appointment > medication > FAQ.
//! No model required, classification is a pure function of the text.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::{KeywordCategory, KeywordSet};

/// Detected intent type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Intent {
    /// Emergency phrase (911, chest pain, stroke, etc.)
    Emergency,
    /// Mentions a common symptom; carries the raw message
    SymptomCheck(String),
    /// Wants to book or schedule a visit
    Appointment,
    /// Asks about a medication; carries the raw message
    Medication(String),
    /// Clinic question (hours, insurance, cancellation); carries the raw message
    Faq(String),
    /// Nothing matched; carries the raw message
    Unknown(String),
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Emergency => "emergency",
            Intent::SymptomCheck(_) => "symptom_check",
            Intent::Appointment => "appointment",
            Intent::Medication(_) => "medication",
            Intent::Faq(_) => "faq",
            Intent::Unknown(_) => "unknown",
        }
    }

    /// The raw message carried by the intent, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Intent::SymptomCheck(t) | Intent::Medication(t) | Intent::Faq(t) | Intent::Unknown(t) => {
                Some(t)
            }
            Intent::Emergency | Intent::Appointment => None,
        }
    }

    fn from_category(category: KeywordCategory, message: &str) -> Self {
        match category {
            KeywordCategory::Emergency => Intent::Emergency,
            KeywordCategory::Symptom => Intent::SymptomCheck(message.to_string()),
            KeywordCategory::AppointmentTrigger => Intent::Appointment,
            KeywordCategory::MedicationTrigger => Intent::Medication(message.to_string()),
            KeywordCategory::FaqTrigger => Intent::Faq(message.to_string()),
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Category that matched (None for Unknown)
    pub category: Option<KeywordCategory>,
    /// Keyword that triggered the match
    pub matched_keyword: Option<String>,
}

/// Keyword group for one routed category
struct IntentPattern {
    category: KeywordCategory,
    keywords: KeywordSet,
}

/// Intent classifier using priority-ordered keyword groups
pub struct IntentClassifier {
    patterns: Vec<IntentPattern>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a new intent classifier with all keyword groups
    pub fn new() -> Self {
        let patterns = KeywordCategory::PRIORITY
            .iter()
            .map(|&category| IntentPattern {
                category,
                keywords: KeywordSet::for_category(category),
            })
            .collect();

        Self { patterns }
    }

    /// Classify the intent of a message
    pub fn classify(&self, message: &str) -> Intent {
        self.classify_detailed(message).intent
    }

    /// Classify and report which category and keyword decided it
    pub fn classify_detailed(&self, message: &str) -> IntentResult {
        let lowered = message.to_lowercase();

        for group in &self.patterns {
            if let Some(keyword) = group.keywords.first_match(&lowered) {
                return IntentResult {
                    intent: Intent::from_category(group.category, message),
                    category: Some(group.category),
                    matched_keyword: Some(keyword.to_string()),
                };
            }
        }

        IntentResult {
            intent: Intent::Unknown(message.to_string()),
            category: None,
            matched_keyword: None,
        }
    }
}
