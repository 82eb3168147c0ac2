//! Keyword tables for intent routing.
//!
//! Each category holds an ordered list of lowercase trigger substrings.
//! Matching is plain substring containment against the lowercased message,
//! so multi-word triggers ("chest pain") work without tokenization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phrases that indicate an emergency, checked before anything else
const EMERGENCY_KEYWORDS: &[&str] = &[
    "emergency",
    "911",
    "urgent",
    "severe pain",
    "cant breathe",
    "chest pain",
    "heart attack",
    "stroke",
];

/// Common symptoms that route to the symptom checker
const SYMPTOM_KEYWORDS: &[&str] = &[
    "headache",
    "fever",
    "cough",
    "sore throat",
    "stomach pain",
    "back pain",
    "chest pain",
    "shortness of breath",
    "dizziness",
    "nausea",
    "fatigue",
    "rash",
];

const APPOINTMENT_KEYWORDS: &[&str] = &["appointment", "book", "schedule"];

const MEDICATION_KEYWORDS: &[&str] = &["medication", "medicine", "drug"];

const FAQ_KEYWORDS: &[&str] = &["hours", "insurance", "cancel"];

/// Symptoms that escalate a symptom check to an emergency notice
const EMERGENCY_SYMPTOMS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe bleeding",
    "unconsciousness",
    "severe head injury",
    "stroke symptoms",
    "severe allergic reaction",
];

/// Keyword category, listed in routing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Emergency,
    Symptom,
    AppointmentTrigger,
    MedicationTrigger,
    FaqTrigger,
}

impl KeywordCategory {
    /// All routed categories, highest priority first
    pub const PRIORITY: [KeywordCategory; 5] = [
        KeywordCategory::Emergency,
        KeywordCategory::Symptom,
        KeywordCategory::AppointmentTrigger,
        KeywordCategory::MedicationTrigger,
        KeywordCategory::FaqTrigger,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KeywordCategory::Emergency => "emergency",
            KeywordCategory::Symptom => "symptom",
            KeywordCategory::AppointmentTrigger => "appointment_trigger",
            KeywordCategory::MedicationTrigger => "medication_trigger",
            KeywordCategory::FaqTrigger => "faq_trigger",
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An ordered, immutable list of trigger substrings
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    keywords: &'static [&'static str],
}

impl KeywordSet {
    pub const fn new(keywords: &'static [&'static str]) -> Self {
        Self { keywords }
    }

    /// Keyword set for a routed category
    pub fn for_category(category: KeywordCategory) -> Self {
        match category {
            KeywordCategory::Emergency => Self::new(EMERGENCY_KEYWORDS),
            KeywordCategory::Symptom => Self::new(SYMPTOM_KEYWORDS),
            KeywordCategory::AppointmentTrigger => Self::new(APPOINTMENT_KEYWORDS),
            KeywordCategory::MedicationTrigger => Self::new(MEDICATION_KEYWORDS),
            KeywordCategory::FaqTrigger => Self::new(FAQ_KEYWORDS),
        }
    }

    /// Symptoms that require immediate medical attention
    pub fn emergency_symptoms() -> Self {
        Self::new(EMERGENCY_SYMPTOMS)
    }

    /// Returns the first keyword contained in `lowered`.
    ///
    /// The caller is responsible for lowercasing; this keeps the scan free of
    /// allocations when several sets are checked against the same message.
    pub fn first_match(&self, lowered: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|k| lowered.contains(k))
    }

    pub fn matches(&self, lowered: &str) -> bool {
        self.first_match(lowered).is_some()
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_respects_list_order() {
        let set = KeywordSet::for_category(KeywordCategory::Emergency);
        assert_eq!(set.first_match("urgent: chest pain"), Some("urgent"));
        assert_eq!(set.first_match("call 911 now"), Some("911"));
        assert_eq!(set.first_match("feeling fine"), None);
    }

    #[test]
    fn test_multi_word_keywords() {
        let set = KeywordSet::for_category(KeywordCategory::Symptom);
        assert!(set.matches("i have a sore throat"));
        assert!(!set.matches("my throat is sore"));
    }

    #[test]
    fn test_matching_expects_lowercase_input() {
        let set = KeywordSet::for_category(KeywordCategory::FaqTrigger);
        assert!(!set.matches("HOURS"));
        assert!(set.matches(&"HOURS".to_lowercase()));
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(KeywordCategory::PRIORITY[0], KeywordCategory::Emergency);
        assert_eq!(KeywordCategory::PRIORITY[4], KeywordCategory::FaqTrigger);
    }

    #[test]
    fn test_emergency_symptoms_table() {
        let set = KeywordSet::emergency_symptoms();
        assert!(set.matches("signs of stroke symptoms"));
        assert!(!set.matches("i had a stroke of luck"));
        assert_eq!(set.keywords().len(), 7);
    }
}
