//! Symptom triage.
//!
//! Escalates to an emergency notice when a red-flag symptom is described,
//! otherwise assembles general self-care guidance. This is not a diagnosis.

use serde::{Deserialize, Serialize};

use super::keywords::KeywordSet;

const FEVER_GUIDANCE: &[&str] = &[
    "Rest and stay hydrated",
    "Consider over-the-counter pain relievers",
    "Monitor your temperature",
];

const THROAT_GUIDANCE: &[&str] = &[
    "Stay hydrated with warm liquids",
    "Use throat lozenges",
    "Rest your voice",
];

pub const SEEK_CARE_HEADING: &str = "**When to seek medical care:**";

const SEEK_CARE_GUIDANCE: &[&str] = &[
    "Symptoms worsen or don't improve after 3-5 days",
    "You develop a high fever (over 103°F)",
    "You have difficulty breathing",
    "You feel concerned about your symptoms",
];

pub const BOOKING_OFFER: &str =
    "Would you like me to help you book an appointment with a healthcare provider?";

/// Named block of guidance lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceBlock {
    /// Fever or headache
    FeverHeadache,
    /// Cough or sore throat
    CoughThroat,
    /// Always present
    SeekCare,
}

impl AdviceBlock {
    pub fn lines(&self) -> &'static [&'static str] {
        match self {
            AdviceBlock::FeverHeadache => FEVER_GUIDANCE,
            AdviceBlock::CoughThroat => THROAT_GUIDANCE,
            AdviceBlock::SeekCare => SEEK_CARE_GUIDANCE,
        }
    }
}

/// Outcome of triaging a symptom description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SymptomAssessment {
    /// A red-flag symptom was mentioned; no advice is generated
    Emergency { matched_symptom: String },
    /// General guidance, blocks in display order
    Advice { blocks: Vec<AdviceBlock> },
}

impl SymptomAssessment {
    pub fn is_emergency(&self) -> bool {
        matches!(self, SymptomAssessment::Emergency { .. })
    }

    pub fn blocks(&self) -> &[AdviceBlock] {
        match self {
            SymptomAssessment::Emergency { .. } => &[],
            SymptomAssessment::Advice { blocks } => blocks,
        }
    }
}

/// Triage a free-text symptom description
pub fn assess(symptoms: &str) -> SymptomAssessment {
    let lowered = symptoms.to_lowercase();

    if let Some(symptom) = KeywordSet::emergency_symptoms().first_match(&lowered) {
        return SymptomAssessment::Emergency {
            matched_symptom: symptom.to_string(),
        };
    }

    let mut blocks = Vec::new();
    if lowered.contains("fever") || lowered.contains("headache") {
        blocks.push(AdviceBlock::FeverHeadache);
    }
    if lowered.contains("cough") || lowered.contains("sore throat") {
        blocks.push(AdviceBlock::CoughThroat);
    }
    blocks.push(AdviceBlock::SeekCare);

    SymptomAssessment::Advice { blocks }
}

/// Render advice blocks as the chat message text
pub fn advice_text(symptoms: &str, blocks: &[AdviceBlock]) -> String {
    let mut text = format!(
        "Based on your symptoms: \"{}\", here's some general guidance:\n\n",
        symptoms
    );

    for block in blocks.iter().filter(|b| **b != AdviceBlock::SeekCare) {
        for line in block.lines() {
            text.push_str("• ");
            text.push_str(line);
            text.push('\n');
        }
    }

    if blocks.contains(&AdviceBlock::SeekCare) {
        text.push('\n');
        text.push_str(SEEK_CARE_HEADING);
        text.push('\n');
        for line in AdviceBlock::SeekCare.lines() {
            text.push_str("• ");
            text.push_str(line);
            text.push('\n');
        }
        text.push('\n');
    }

    text.push_str(BOOKING_OFFER);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fever_and_headache() {
        let assessment = assess("I have a fever and headache");
        assert_eq!(
            assessment.blocks(),
            &[AdviceBlock::FeverHeadache, AdviceBlock::SeekCare]
        );
        assert!(!assessment.is_emergency());
    }

    #[test]
    fn test_cough_only() {
        let assessment = assess("Bad COUGH since Monday");
        assert_eq!(assessment.blocks(), &[AdviceBlock::CoughThroat, AdviceBlock::SeekCare]);
    }

    #[test]
    fn test_both_blocks_in_order() {
        let assessment = assess("sore throat and a fever");
        assert_eq!(
            assessment.blocks(),
            &[AdviceBlock::FeverHeadache, AdviceBlock::CoughThroat, AdviceBlock::SeekCare]
        );
    }

    #[test]
    fn test_emergency_symptom_escalates() {
        let assessment = assess("fever and difficulty breathing");
        assert_eq!(
            assessment,
            SymptomAssessment::Emergency {
                matched_symptom: "difficulty breathing".to_string()
            }
        );
        assert!(assessment.blocks().is_empty());
    }

    #[test]
    fn test_advice_text_layout() {
        let text = advice_text("fever", &[AdviceBlock::FeverHeadache, AdviceBlock::SeekCare]);
        assert!(text.starts_with("Based on your symptoms: \"fever\""));
        assert!(text.contains("• Monitor your temperature\n"));
        assert!(text.contains(SEEK_CARE_HEADING));
        assert!(text.ends_with(BOOKING_OFFER));
        assert!(!text.contains("lozenges"));
    }
}
