//! Display sequences: the ordered, paced bot messages for one response.
//!
//! Each event carries the delay to wait after the previous event. The router
//! never sleeps; pacing is applied only when a sequence is played.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::brain::{Content, FaqEntry, MedicationEntry, QuickAction, ResponsePayload};
use crate::config::PacingConfig;

/// What triggered the response being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Message,
    QuickAction,
    Welcome,
}

/// Structured part of a bot message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attachment {
    Faq { entry: FaqEntry },
    Medication { entry: MedicationEntry },
    Tip { tip: String },
    AppointmentForm {
        departments: Vec<String>,
        time_slots: Vec<String>,
    },
    EmergencyNotice {
        headline: String,
        instructions: Vec<String>,
    },
    Actions { actions: Vec<QuickAction> },
}

/// One chat bubble
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotMessage {
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
}

impl BotMessage {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            attachment: None,
        }
    }

    fn attachment(attachment: Attachment) -> Self {
        Self {
            text: None,
            attachment: Some(attachment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DisplayKind {
    /// Show the typing indicator; hidden by the next message
    Typing,
    Message(BotMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEvent {
    /// Wait after the previous event
    pub delay: Duration,
    pub kind: DisplayKind,
}

impl DisplayEvent {
    pub fn message(&self) -> Option<&BotMessage> {
        match &self.kind {
            DisplayKind::Message(m) => Some(m),
            DisplayKind::Typing => None,
        }
    }
}

/// Ordered queue of display events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySequence {
    events: Vec<DisplayEvent>,
}

impl DisplaySequence {
    pub fn from_payload(payload: &ResponsePayload, pacing: &PacingConfig, origin: Origin) -> Self {
        let mut seq = DisplaySequence::default();

        let lead_delay = match origin {
            Origin::Message => {
                seq.push(Duration::ZERO, DisplayKind::Typing);
                pacing.typing_delay()
            }
            Origin::QuickAction => {
                seq.push(Duration::ZERO, DisplayKind::Typing);
                pacing.quick_action_delay()
            }
            Origin::Welcome => pacing.welcome_delay(),
        };
        seq.push_message(lead_delay, BotMessage::text(&payload.primary_text));

        // Welcome notes follow at the follow-up pace; elsewhere a note opens a new typed reply
        for note in &payload.notes {
            match origin {
                Origin::Welcome => seq.push_message(pacing.follow_up_delay(), BotMessage::text(note)),
                _ => {
                    seq.push(Duration::ZERO, DisplayKind::Typing);
                    seq.push_message(pacing.quick_action_delay(), BotMessage::text(note));
                }
            }
        }

        // Delay before the closing text: one stagger after a list, else the follow-up delay
        let closing_delay = match &payload.content {
            Content::None => pacing.follow_up_delay(),
            Content::FaqList { entries } => {
                let step = pacing.faq_stagger();
                for entry in entries {
                    seq.push_message(
                        step,
                        BotMessage::attachment(Attachment::Faq {
                            entry: entry.clone(),
                        }),
                    );
                }
                step
            }
            Content::MedicationList { entries } => {
                let step = pacing.medication_stagger();
                for entry in entries {
                    seq.push_message(
                        step,
                        BotMessage::attachment(Attachment::Medication {
                            entry: entry.clone(),
                        }),
                    );
                }
                step
            }
            Content::TipList { tips } => {
                let step = pacing.tip_stagger();
                for tip in tips {
                    seq.push_message(step, BotMessage::attachment(Attachment::Tip { tip: tip.clone() }));
                }
                step
            }
            Content::AppointmentForm {
                departments,
                time_slots,
            } => {
                seq.push_message(
                    pacing.notice_delay(),
                    BotMessage::attachment(Attachment::AppointmentForm {
                        departments: departments.clone(),
                        time_slots: time_slots.clone(),
                    }),
                );
                pacing.follow_up_delay()
            }
            Content::EmergencyNotice {
                headline,
                instructions,
            } => {
                seq.push_message(
                    pacing.notice_delay(),
                    BotMessage::attachment(Attachment::EmergencyNotice {
                        headline: headline.clone(),
                        instructions: instructions.clone(),
                    }),
                );
                pacing.follow_up_delay()
            }
        };

        if let Some(closing) = &payload.closing_text {
            seq.push_message(closing_delay, BotMessage::text(closing));
        }

        if let Some(follow_up) = &payload.follow_up {
            seq.push_message(
                pacing.follow_up_delay(),
                BotMessage {
                    text: Some(follow_up.prompt.clone()),
                    attachment: Some(Attachment::Actions {
                        actions: follow_up.actions.clone(),
                    }),
                },
            );
        }

        seq
    }

    fn push(&mut self, delay: Duration, kind: DisplayKind) {
        self.events.push(DisplayEvent { delay, kind });
    }

    fn push_message(&mut self, delay: Duration, message: BotMessage) {
        self.push(delay, DisplayKind::Message(message));
    }

    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of all delays
    pub fn total_delay(&self) -> Duration {
        self.events.iter().map(|e| e.delay).sum()
    }

    /// Bot messages only, typing indicators skipped
    pub fn messages(&self) -> impl Iterator<Item = &BotMessage> {
        self.events.iter().filter_map(DisplayEvent::message)
    }
}

impl IntoIterator for DisplaySequence {
    type Item = DisplayEvent;
    type IntoIter = std::vec::IntoIter<DisplayEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
