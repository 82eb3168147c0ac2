//! Response payloads produced by the router.
//!
//! Renderers pattern-match on [`Content`] instead of probing optional strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::knowledge::{FaqEntry, MedicationEntry};
use crate::error::AppError;

/// Shortcut that selects a canned response without text classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickAction {
    Symptoms,
    Appointment,
    Faq,
    Emergency,
    Medications,
    Tips,
}

impl QuickAction {
    pub const ALL: [QuickAction; 6] = [
        QuickAction::Symptoms,
        QuickAction::Appointment,
        QuickAction::Faq,
        QuickAction::Emergency,
        QuickAction::Medications,
        QuickAction::Tips,
    ];

    /// Actions offered by the main menu
    pub const MENU: [QuickAction; 4] = [
        QuickAction::Symptoms,
        QuickAction::Appointment,
        QuickAction::Faq,
        QuickAction::Tips,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            QuickAction::Symptoms => "symptoms",
            QuickAction::Appointment => "appointment",
            QuickAction::Faq => "faq",
            QuickAction::Emergency => "emergency",
            QuickAction::Medications => "medications",
            QuickAction::Tips => "tips",
        }
    }

    /// Button caption
    pub fn caption(&self) -> &'static str {
        match self {
            QuickAction::Symptoms => "🩺 Check Symptoms",
            QuickAction::Appointment => "📅 Book Appointment",
            QuickAction::Faq => "❓ Common Questions",
            QuickAction::Emergency => "🚨 Emergency Help",
            QuickAction::Medications => "💊 Medications",
            QuickAction::Tips => "💡 Health Tips",
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for QuickAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        QuickAction::ALL
            .into_iter()
            .find(|a| a.id() == wanted)
            .ok_or_else(|| AppError::UnknownAction(s.trim().to_string()))
    }
}

/// Structured content attached to a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// Plain text only
    None,
    FaqList { entries: Vec<FaqEntry> },
    MedicationList { entries: Vec<MedicationEntry> },
    TipList { tips: Vec<String> },
    /// Fields a front end needs to show the appointment form
    AppointmentForm {
        departments: Vec<String>,
        time_slots: Vec<String>,
    },
    /// Call-for-help notice, shown as prominently as the front end allows
    EmergencyNotice {
        headline: String,
        instructions: Vec<String>,
    },
}

impl Content {
    pub fn is_none(&self) -> bool {
        matches!(self, Content::None)
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, Content::EmergencyNotice { .. })
    }
}

/// Prompt plus the quick actions offered after a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub prompt: String,
    pub actions: Vec<QuickAction>,
}

/// Everything a renderer needs to display one bot turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub primary_text: String,
    /// Extra text messages shown after the primary text, before the content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUp>,
}

impl ResponsePayload {
    pub fn text(primary_text: impl Into<String>) -> Self {
        Self {
            primary_text: primary_text.into(),
            notes: vec![],
            content: Content::None,
            closing_text: None,
            follow_up: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn with_closing(mut self, closing: impl Into<String>) -> Self {
        self.closing_text = Some(closing.into());
        self
    }

    pub fn with_follow_up(mut self, prompt: impl Into<String>, actions: &[QuickAction]) -> Self {
        self.follow_up = Some(FollowUp {
            prompt: prompt.into(),
            actions: actions.to_vec(),
        });
        self
    }

    /// Actions offered after this response
    pub fn follow_up_actions(&self) -> &[QuickAction] {
        self.follow_up
            .as_ref()
            .map(|f| f.actions.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_action_parsing() {
        assert_eq!("symptoms".parse::<QuickAction>().unwrap(), QuickAction::Symptoms);
        assert_eq!(" TIPS ".parse::<QuickAction>().unwrap(), QuickAction::Tips);
        match "dance".parse::<QuickAction>() {
            Err(AppError::UnknownAction(id)) => assert_eq!(id, "dance"),
            other => panic!("Expected UnknownAction, got {:?}", other),
        }
    }

    #[test]
    fn test_quick_action_ids_round_trip() {
        for action in QuickAction::ALL {
            assert_eq!(action.id().parse::<QuickAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_builder_and_follow_up_actions() {
        let payload = ResponsePayload::text("hi")
            .with_note("note")
            .with_closing("bye")
            .with_follow_up("Next?", &QuickAction::MENU);

        assert_eq!(payload.notes, vec!["note".to_string()]);
        assert_eq!(payload.closing_text.as_deref(), Some("bye"));
        assert_eq!(payload.follow_up_actions().len(), 4);
        assert!(payload.content.is_none());

        assert!(ResponsePayload::text("x").follow_up_actions().is_empty());
    }

    #[test]
    fn test_payload_serialization_shape() {
        let payload = ResponsePayload::text("Tips").with_content(Content::TipList {
            tips: vec!["Sleep".to_string()],
        });
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["content"]["type"], "tip_list");
        assert_eq!(json["content"]["tips"][0], "Sleep");
        assert!(json.get("notes").is_none());
        assert!(json.get("follow_up").is_none());
    }
}
