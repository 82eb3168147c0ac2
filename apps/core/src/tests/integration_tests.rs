//! Integration Tests
//!
//! Full conversations through the actor, the router and a recording
//! renderer, as a front end would drive them.

use crate::actors::ConversationHandle;
use crate::appointments::AppointmentRequest;
use crate::brain::knowledge::{DISCLAIMER_TEXT, MENU_PROMPT, WELCOME_TEXT};
use crate::brain::{KnowledgeBase, QuickAction};
use crate::config::{BotConfig, PacingConfig};
use crate::display::{Attachment, DisplayEvent, DisplayKind, RecordingRenderer};
use chrono::NaiveDate;
use std::sync::Arc;

fn attachments(events: &[(String, DisplayEvent)]) -> Vec<Attachment> {
    events
        .iter()
        .filter_map(|(_, e)| e.message().and_then(|m| m.attachment.clone()))
        .collect()
}

#[cfg(test)]
mod conversation_flow_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_full_conversation() {
        let renderer = Arc::new(RecordingRenderer::new());
        let handle = ConversationHandle::new(&BotConfig::default(), renderer.clone());
        let session = ConversationHandle::new_session_id();

        // 1. Greeting: welcome, disclaimer, menu
        handle.welcome(&session).await.unwrap();
        assert_eq!(
            renderer.texts(),
            vec![WELCOME_TEXT, DISCLAIMER_TEXT, MENU_PROMPT]
        );

        // 2. Symptom flow: the quick action asks, the next message answers
        handle.quick_action(&session, QuickAction::Symptoms).await.unwrap();
        let advice = handle.send_text(&session, "my back is sore").await.unwrap();
        assert!(advice.primary_text.contains("\"my back is sore\""));
        assert_eq!(
            advice.follow_up_actions(),
            &[QuickAction::Appointment, QuickAction::Emergency]
        );

        // 3. Booking from the follow-up button
        let before = renderer.events().len();
        handle.quick_action(&session, QuickAction::Appointment).await.unwrap();
        let booking = renderer.events().split_off(before);
        let forms: Vec<Attachment> = attachments(&booking)
            .into_iter()
            .filter(|a| matches!(a, Attachment::AppointmentForm { .. }))
            .collect();
        assert_eq!(forms.len(), 1);

        let request: AppointmentRequest =
            "Sam Lee|555-222-3333||General Medicine|2026-10-20|09:00|Back pain"
                .parse()
                .unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let confirmation = request.confirm(&KnowledgeBase, today).unwrap();
        assert!(confirmation.contains("**Time:** 9:00 AM"));

        // 4. Emergency wording wins over everything else
        let emergency = handle
            .send_text(&session, "schedule me, I have severe pain")
            .await
            .unwrap();
        assert!(emergency.content.is_emergency());

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_tips_quick_action_shows_configured_count() {
        let config = BotConfig {
            pacing: PacingConfig::immediate(),
            tip_count: 3,
            ..BotConfig::default()
        };
        let renderer = Arc::new(RecordingRenderer::new());
        let handle = ConversationHandle::new(&config, renderer.clone());

        handle.quick_action("s1", QuickAction::Tips).await.unwrap();

        let tips: Vec<String> = attachments(&renderer.events())
            .into_iter()
            .filter_map(|a| match a {
                Attachment::Tip { tip } => Some(tip),
                _ => None,
            })
            .collect();
        assert_eq!(tips.len(), 3);
        let known = KnowledgeBase.health_tips();
        assert!(tips.iter().all(|t| known.contains(&t.as_str())));
    }

    #[tokio::test]
    async fn test_faq_quick_action_lists_every_entry() {
        let config = BotConfig {
            pacing: PacingConfig::immediate(),
            ..BotConfig::default()
        };
        let renderer = Arc::new(RecordingRenderer::new());
        let handle = ConversationHandle::new(&config, renderer.clone());

        handle.quick_action("s1", QuickAction::Faq).await.unwrap();

        let events = renderer.events();
        assert!(matches!(events[0].1.kind, DisplayKind::Typing));
        let questions: Vec<String> = attachments(&events)
            .into_iter()
            .filter_map(|a| match a {
                Attachment::Faq { entry } => Some(entry.question),
                _ => None,
            })
            .collect();
        let expected: Vec<String> = KnowledgeBase.faq().iter().map(|e| e.question.clone()).collect();
        assert_eq!(questions, expected);
    }

    #[tokio::test]
    async fn test_display_events_serialize_for_front_ends() {
        let config = BotConfig {
            pacing: PacingConfig::immediate(),
            ..BotConfig::default()
        };
        let renderer = Arc::new(RecordingRenderer::new());
        let handle = ConversationHandle::new(&config, renderer.clone());

        handle.send_text("s1", "tell me about medicine for tylenol").await.unwrap();

        for (_, event) in renderer.events() {
            let json = serde_json::to_value(&event).unwrap();
            let back: DisplayEvent = serde_json::from_value(json).unwrap();
            assert_eq!(back, event);
        }
        let json = serde_json::to_value(&renderer.events()[2].1).unwrap();
        assert_eq!(json["kind"]["event"], "message");
        assert_eq!(json["kind"]["attachment"]["type"], "medication");
        assert_eq!(json["kind"]["attachment"]["entry"]["use"], "Pain relief, fever reducer");
    }
}
