//! Intent Router - turns a classified message or a quick action into a
//! [`ResponsePayload`].
//!
//! The router is synchronous and holds no conversation state of its own.
//! Multi-turn flows (e.g. "describe your symptoms") live in a per-session
//! [`SessionState`] that the caller owns and passes in.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::intent::{Intent, IntentClassifier, IntentResult};
use super::knowledge::{FaqMatchRule, KnowledgeBase, DISCLAIMER_TEXT, MENU_PROMPT, WELCOME_TEXT};
use super::response::{Content, QuickAction, ResponsePayload};
use super::symptoms::{self, SymptomAssessment};

const EMERGENCY_OPENING: &str = "🚨 Opening emergency information for you right away!";
const EMERGENCY_ESCALATION: &str = "🚨 **IMPORTANT**: Your symptoms may require immediate medical attention. Please consider calling 911 or visiting the nearest emergency room.";
const NEXT_STEP_PROMPT: &str = "What would you like to do next?";

/// Conversation input the session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwaitingInput {
    /// The user was asked to describe their symptoms
    SymptomDescription,
}

/// Per-conversation routing state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub awaiting: Option<AwaitingInput>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Router settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterOptions {
    pub faq_match: FaqMatchRule,
    /// Number of tips shown by the `tips` quick action
    pub tip_count: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            faq_match: FaqMatchRule::Keywords,
            tip_count: 5,
        }
    }
}

/// Rule-based dispatcher from free text or quick actions to canned responses
pub struct IntentRouter {
    classifier: IntentClassifier,
    knowledge: KnowledgeBase,
    options: RouterOptions,
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentRouter {
    pub fn new() -> Self {
        Self::with_options(RouterOptions::default())
    }

    pub fn with_options(options: RouterOptions) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            knowledge: KnowledgeBase,
            options,
        }
    }

    /// Classify a message; never consults session state
    pub fn classify(&self, message: &str) -> Intent {
        self.classifier.classify(message)
    }

    /// Classify a message, then resolve it against the session flow.
    ///
    /// A session waiting for a symptom description treats an otherwise
    /// unrecognized message as that description. The waiting flag is
    /// cleared by every routed message.
    pub fn resolve(&self, session: &mut SessionState, message: &str) -> IntentResult {
        let mut result = self.classifier.classify_detailed(message);

        let awaiting = session.awaiting.take();
        if let (Some(AwaitingInput::SymptomDescription), Intent::Unknown(text)) =
            (awaiting, &result.intent)
        {
            debug!("Treating unmatched message as awaited symptom description");
            result.intent = Intent::SymptomCheck(text.clone());
        }

        debug!(
            intent = %result.intent,
            category = ?result.category,
            keyword = ?result.matched_keyword,
            "Message classified"
        );
        result
    }

    /// Route a trimmed, non-empty user message
    pub fn route(&self, session: &mut SessionState, message: &str) -> ResponsePayload {
        let resolved = self.resolve(session, message);
        self.respond(&resolved.intent)
    }

    /// Build the response for an already classified intent
    pub fn respond(&self, intent: &Intent) -> ResponsePayload {
        match intent {
            Intent::Emergency => self.emergency(),
            Intent::SymptomCheck(text) => self.symptom_check(text),
            Intent::Appointment => ResponsePayload::text(
                "I'd be happy to help you book an appointment. Let me gather some information from you.",
            )
            .with_content(self.appointment_form()),
            Intent::Medication(query) => self.medication_query(query),
            Intent::Faq(query) => self.faq_query(query),
            Intent::Unknown(text) => ResponsePayload::text(format!(
                "I understand you're asking about: \"{}\". Let me help you with that. You can:",
                text
            ))
            .with_follow_up(MENU_PROMPT, &QuickAction::MENU),
        }
    }

    /// Canned response for a quick action, bypassing classification
    pub fn quick_action(&self, session: &mut SessionState, action: QuickAction) -> ResponsePayload {
        self.quick_action_with_rng(session, action, &mut rand::thread_rng())
    }

    /// Same as [`quick_action`](Self::quick_action) with a caller-provided RNG for tip selection
    pub fn quick_action_with_rng<R: Rng + ?Sized>(
        &self,
        session: &mut SessionState,
        action: QuickAction,
        rng: &mut R,
    ) -> ResponsePayload {
        debug!(action = %action, "Quick action");
        session.awaiting = None;

        match action {
            QuickAction::Symptoms => {
                session.awaiting = Some(AwaitingInput::SymptomDescription);
                ResponsePayload::text(
                    "I can help you understand your symptoms better. Please note that this is not a medical diagnosis - always consult a healthcare professional for medical advice.",
                )
                .with_closing(
                    "What symptoms are you experiencing? Please describe them as specifically as possible.",
                )
            }
            QuickAction::Appointment => ResponsePayload::text(
                "I'd be happy to help you book an appointment. Let me open the appointment form for you.",
            )
            .with_content(self.appointment_form()),
            QuickAction::Faq => self.faq_list(),
            QuickAction::Emergency => self.emergency(),
            QuickAction::Medications => self.medication_list(),
            QuickAction::Tips => ResponsePayload::text(
                "Here are some daily health tips to keep you healthy and feeling great:",
            )
            .with_content(Content::TipList {
                tips: self.knowledge.pick_tips(rng, self.options.tip_count),
            })
            .with_closing(
                "Remember, small daily habits can make a big difference in your overall health! Is there anything specific about health and wellness you'd like to know more about?",
            ),
        }
    }

    /// Greeting shown when a conversation starts or is cleared
    pub fn welcome(&self) -> ResponsePayload {
        ResponsePayload::text(WELCOME_TEXT)
            .with_note(DISCLAIMER_TEXT)
            .with_follow_up(MENU_PROMPT, &QuickAction::MENU)
    }

    fn emergency(&self) -> ResponsePayload {
        ResponsePayload::text(EMERGENCY_OPENING).with_content(emergency_notice())
    }

    fn symptom_check(&self, text: &str) -> ResponsePayload {
        match symptoms::assess(text) {
            SymptomAssessment::Emergency { matched_symptom } => {
                debug!(symptom = %matched_symptom, "Symptom check escalated to emergency");
                ResponsePayload::text(EMERGENCY_ESCALATION).with_content(emergency_notice())
            }
            SymptomAssessment::Advice { blocks } => {
                ResponsePayload::text(symptoms::advice_text(text, &blocks)).with_follow_up(
                    NEXT_STEP_PROMPT,
                    &[QuickAction::Appointment, QuickAction::Emergency],
                )
            }
        }
    }

    fn appointment_form(&self) -> Content {
        Content::AppointmentForm {
            departments: self.knowledge.departments().iter().map(|d| d.to_string()).collect(),
            time_slots: self.knowledge.time_slots().iter().map(|t| t.to_string()).collect(),
        }
    }

    fn faq_query(&self, query: &str) -> ResponsePayload {
        match self.knowledge.find_faq(query, self.options.faq_match) {
            Some(entry) => ResponsePayload::text("Here's what I found:").with_content(Content::FaqList {
                entries: vec![entry.clone()],
            }),
            None => {
                let mut payload = self.faq_list();
                let intro = std::mem::replace(
                    &mut payload.primary_text,
                    "Let me show you all our frequently asked questions that might help:".to_string(),
                );
                payload.notes.insert(0, intro);
                payload
            }
        }
    }

    fn faq_list(&self) -> ResponsePayload {
        ResponsePayload::text("Here are answers to frequently asked questions:")
            .with_content(Content::FaqList {
                entries: self.knowledge.faq().to_vec(),
            })
            .with_closing("Do you have any other questions? Feel free to ask me anything!")
    }

    fn medication_query(&self, query: &str) -> ResponsePayload {
        match self.knowledge.find_medication(query) {
            Some(med) => ResponsePayload::text("Here's information about that medication:")
                .with_content(Content::MedicationList {
                    entries: vec![med.clone()],
                }),
            None => {
                let mut payload = self.medication_list();
                let intro = std::mem::replace(
                    &mut payload.primary_text,
                    "I don't have specific information about that medication. Let me show you information about common medications I can help with:".to_string(),
                );
                payload.notes.insert(0, intro);
                payload
            }
        }
    }

    fn medication_list(&self) -> ResponsePayload {
        ResponsePayload::text(
            "I can provide information about common over-the-counter medications. Here are some frequently asked about medications:",
        )
        .with_content(Content::MedicationList {
            entries: self.knowledge.medications().to_vec(),
        })
        .with_closing(
            "⚠️ **Important Reminder**: Always consult with your healthcare provider or pharmacist before starting any new medication, even over-the-counter ones. They can check for interactions with your current medications and ensure it's safe for you.",
        )
    }
}

fn emergency_notice() -> Content {
    Content::EmergencyNotice {
        headline: "If this is a medical emergency, call 911 now.".to_string(),
        instructions: vec![
            "Call 911 or go to the nearest emergency room for life-threatening symptoms".to_string(),
            "Poison Control: 1-800-222-1222".to_string(),
            "Suicide & Crisis Lifeline: call or text 988".to_string(),
            format!("Clinic (non-emergency): {}", super::knowledge::CLINIC_PHONE),
        ],
    }
}
