//! # Brain Module
//!
//! Rule-based intent routing for HealthBot.
//! Decides which canned response to show for a user message or quick action.
//!
//! ## Components
//! - `keywords`: Ordered trigger keyword tables per category
//! - `intent`: Priority-ordered intent classification
//! - `knowledge`: FAQ, medication, tip and department tables with lookups
//! - `symptoms`: Symptom triage (emergency escalation or self-care advice)
//! - `response`: Output data structures (`ResponsePayload`, `QuickAction`)
//! - `router`: Main dispatcher, with per-session conversation state

pub mod intent;
pub mod keywords;
pub mod knowledge;
pub mod response;
pub mod router;
pub mod symptoms;

// Re-export main types for convenience
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use keywords::{KeywordCategory, KeywordSet};
pub use knowledge::{FaqEntry, FaqMatchRule, KnowledgeBase, MedicationEntry};
pub use response::{Content, FollowUp, QuickAction, ResponsePayload};
pub use router::{AwaitingInput, IntentRouter, RouterOptions, SessionState};
pub use symptoms::{AdviceBlock, SymptomAssessment};
