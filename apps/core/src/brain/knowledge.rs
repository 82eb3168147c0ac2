//! Static clinic knowledge: FAQ, medications, health tips, departments and
//! the canned texts used by the router.
//!
//! All tables are built once and never mutated.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::AppError;

pub const WELCOME_TEXT: &str = "👋 Hello! I'm HealthBot, your AI healthcare assistant. I can help you with appointments, basic health questions, and provide general medical information. How can I assist you today?";

pub const DISCLAIMER_TEXT: &str = "⚠️ Important: I provide general health information only and cannot diagnose conditions or replace professional medical advice. For medical emergencies, call 911 immediately.";

pub const MENU_PROMPT: &str = "Here are some things I can help you with:";

pub const CLINIC_PHONE: &str = "(555) 123-4567";

/// A frequently asked question with its canned answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    /// Lowercase words that identify this entry in a free-text query
    #[serde(default)]
    pub topics: Vec<String>,
}

impl FaqEntry {
    fn new(question: &str, answer: &str, topics: &[&str]) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Third space-delimited word of the lowercased question
    fn third_word(&self) -> Option<String> {
        self.question
            .to_lowercase()
            .split(' ')
            .nth(2)
            .map(str::to_string)
    }
}

/// An over-the-counter medication summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub name: String,
    #[serde(rename = "use")]
    pub use_for: String,
    pub warning: String,
}

impl MedicationEntry {
    fn new(name: &str, use_for: &str, warning: &str) -> Self {
        Self {
            name: name.to_string(),
            use_for: use_for.to_string(),
            warning: warning.to_string(),
        }
    }

    /// Brand name in parentheses, e.g. "Tylenol" for "Acetaminophen (Tylenol)"
    pub fn brand_name(&self) -> Option<&str> {
        BRAND_NAME
            .captures(&self.name)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
    }
}

/// How a free-text query is matched against FAQ entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaqMatchRule {
    /// Query contains one of the entry's topic words
    #[default]
    Keywords,
    /// Query contains the third word of the entry's question
    ThirdWord,
}

impl FromStr for FaqMatchRule {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keywords" => Ok(FaqMatchRule::Keywords),
            "third_word" | "third-word" => Ok(FaqMatchRule::ThirdWord),
            other => Err(AppError::Config(format!("Unknown FAQ match rule: {}", other))),
        }
    }
}

// NOTE: expect() is acceptable here, the pattern is a compile-time constant
static BRAND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("Invalid regex: brand name pattern"));

static FAQ_ENTRIES: LazyLock<Vec<FaqEntry>> = LazyLock::new(|| {
    vec![
        FaqEntry::new(
            "What are your clinic hours?",
            "Our clinic is open Monday-Friday 8:00 AM to 6:00 PM, and Saturday 9:00 AM to 2:00 PM. We're closed on Sundays.",
            &["hours", "open", "closed"],
        ),
        FaqEntry::new(
            "Do you accept insurance?",
            "We accept most major insurance plans including Medicare, Medicaid, Blue Cross Blue Shield, Aetna, and Cigna. Please call to verify your specific plan.",
            &["insurance", "medicare", "medicaid", "aetna", "cigna"],
        ),
        FaqEntry::new(
            "How do I cancel an appointment?",
            "You can cancel appointments by calling us at least 24 hours in advance, or through our patient portal online.",
            &["cancel", "reschedule"],
        ),
        FaqEntry::new(
            "What should I bring to my appointment?",
            "Please bring a valid ID, insurance cards, list of current medications, and any relevant medical records or test results.",
            &["bring"],
        ),
        FaqEntry::new(
            "Do you offer telemedicine visits?",
            "Yes, we offer virtual consultations for certain conditions. Ask about telemedicine options when booking your appointment.",
            &["telemedicine", "virtual", "video"],
        ),
    ]
});

static MEDICATIONS: LazyLock<Vec<MedicationEntry>> = LazyLock::new(|| {
    vec![
        MedicationEntry::new(
            "Acetaminophen (Tylenol)",
            "Pain relief, fever reducer",
            "Do not exceed 4000mg per day",
        ),
        MedicationEntry::new(
            "Ibuprofen (Advil)",
            "Pain relief, inflammation",
            "Take with food to prevent stomach upset",
        ),
        MedicationEntry::new(
            "Aspirin",
            "Pain relief, blood thinner",
            "Not recommended for children under 16",
        ),
        MedicationEntry::new("Benadryl", "Allergies, sleep aid", "May cause drowsiness"),
        MedicationEntry::new(
            "Pepto Bismol",
            "Stomach upset, diarrhea",
            "Do not use if allergic to aspirin",
        ),
    ]
});

const HEALTH_TIPS: &[&str] = &[
    "💧 Stay hydrated - aim for 8 glasses of water daily",
    "🏃‍♂️ Get at least 30 minutes of exercise most days",
    "😴 Maintain 7-9 hours of quality sleep each night",
    "🥗 Eat a balanced diet with plenty of fruits and vegetables",
    "🧼 Wash your hands frequently to prevent illness",
    "😌 Practice stress management through meditation or hobbies",
    "🚫 Avoid smoking and limit alcohol consumption",
    "☀️ Use sunscreen daily to protect your skin",
];

const DEPARTMENTS: &[&str] = &[
    "General Medicine",
    "Cardiology",
    "Dermatology",
    "Orthopedics",
    "Pediatrics",
    "Gynecology",
    "Psychiatry",
    "Emergency Medicine",
];

/// Bookable slots, 24-hour "HH:MM"
const TIME_SLOTS: &[&str] = &["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"];

/// Read-only view over the static tables
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeBase;

impl KnowledgeBase {
    pub fn faq(&self) -> &'static [FaqEntry] {
        FAQ_ENTRIES.as_slice()
    }

    pub fn medications(&self) -> &'static [MedicationEntry] {
        MEDICATIONS.as_slice()
    }

    pub fn health_tips(&self) -> &'static [&'static str] {
        HEALTH_TIPS
    }

    pub fn departments(&self) -> &'static [&'static str] {
        DEPARTMENTS
    }

    pub fn time_slots(&self) -> &'static [&'static str] {
        TIME_SLOTS
    }

    /// First FAQ entry matching the query under `rule`, in list order
    pub fn find_faq(&self, query: &str, rule: FaqMatchRule) -> Option<&'static FaqEntry> {
        let lowered = query.to_lowercase();
        self.faq().iter().find(|entry| match rule {
            FaqMatchRule::Keywords => entry.topics.iter().any(|t| lowered.contains(t.as_str())),
            FaqMatchRule::ThirdWord => entry
                .third_word()
                .is_some_and(|word| lowered.contains(word.as_str())),
        })
    }

    /// First medication whose name or parenthesized brand name is in the query
    pub fn find_medication(&self, query: &str) -> Option<&'static MedicationEntry> {
        let lowered = query.to_lowercase();
        self.medications().iter().find(|med| {
            lowered.contains(&med.name.to_lowercase())
                || med
                    .brand_name()
                    .is_some_and(|brand| lowered.contains(&brand.to_lowercase()))
        })
    }

    /// Random selection of `count` distinct tips
    pub fn pick_tips<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        HEALTH_TIPS
            .choose_multiple(rng, count)
            .map(|tip| tip.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_brand_name_extraction() {
        let kb = KnowledgeBase;
        assert_eq!(kb.medications()[0].brand_name(), Some("Tylenol"));
        assert_eq!(kb.medications()[1].brand_name(), Some("Advil"));
        assert_eq!(kb.medications()[2].brand_name(), None);
    }

    #[test]
    fn test_third_word() {
        let kb = KnowledgeBase;
        assert_eq!(kb.faq()[0].third_word().as_deref(), Some("your"));
        assert_eq!(kb.faq()[1].third_word().as_deref(), Some("accept"));
    }

    #[test]
    fn test_faq_keyword_rule() {
        let kb = KnowledgeBase;
        let hit = kb.find_faq("what are your hours", FaqMatchRule::Keywords);
        assert_eq!(hit.map(|e| e.question.as_str()), Some("What are your clinic hours?"));
        assert!(kb.find_faq("what is your address", FaqMatchRule::Keywords).is_none());
    }

    #[test]
    fn test_faq_third_word_rule() {
        let kb = KnowledgeBase;
        let hit = kb.find_faq("do you accept my plan", FaqMatchRule::ThirdWord);
        assert_eq!(hit.map(|e| e.question.as_str()), Some("Do you accept insurance?"));
        assert!(kb.find_faq("zzz", FaqMatchRule::ThirdWord).is_none());
    }

    #[test]
    fn test_pick_tips_distinct_and_bounded() {
        let kb = KnowledgeBase;
        let mut rng = StdRng::seed_from_u64(7);

        let tips = kb.pick_tips(&mut rng, 5);
        assert_eq!(tips.len(), 5);
        let mut unique = tips.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);

        let all = kb.pick_tips(&mut rng, 50);
        assert_eq!(all.len(), HEALTH_TIPS.len());
    }

    #[test]
    fn test_match_rule_parsing() {
        assert_eq!("keywords".parse::<FaqMatchRule>().unwrap(), FaqMatchRule::Keywords);
        assert_eq!("Third_Word".parse::<FaqMatchRule>().unwrap(), FaqMatchRule::ThirdWord);
        assert!("fuzzy".parse::<FaqMatchRule>().is_err());
    }
}
