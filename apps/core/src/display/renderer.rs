use async_trait::async_trait;
use std::sync::Mutex;
use tokio::time::sleep;

use super::sequence::{DisplayEvent, DisplaySequence};
use crate::error::AppError;

/// Defines the public interface for a chat front end.
///
/// This trait abstracts how bot messages are shown (terminal, web socket,
/// test recorder), so the conversation actor can drive any of them.
#[async_trait]
pub trait Renderer: Send + Sync + 'static {
    /// Shows a single event. Called in sequence order, after its delay.
    async fn render(&self, session_id: &str, event: &DisplayEvent) -> Result<(), AppError>;
}

/// Plays a sequence: waits each event's delay, then renders it.
pub async fn play<R>(renderer: &R, session_id: &str, sequence: DisplaySequence) -> Result<(), AppError>
where
    R: Renderer + ?Sized,
{
    for event in sequence {
        if !event.delay.is_zero() {
            sleep(event.delay).await;
        }
        renderer.render(session_id, &event).await?;
    }
    Ok(())
}

/// Renderer that keeps every event in memory, for tests and transcripts
#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<(String, DisplayEvent)>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded `(session_id, event)` pairs
    pub fn events(&self) -> Vec<(String, DisplayEvent)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Text of every recorded message, in order
    pub fn texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|(_, e)| e.message().and_then(|m| m.text.clone()))
            .collect()
    }
}

#[async_trait]
impl Renderer for RecordingRenderer {
    async fn render(&self, session_id: &str, event: &DisplayEvent) -> Result<(), AppError> {
        self.events
            .lock()
            .map_err(|e| AppError::Actor(format!("Recorder lock poisoned: {}", e)))?
            .push((session_id.to_string(), event.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{IntentRouter, QuickAction, SessionState};
    use crate::config::PacingConfig;
    use crate::display::sequence::Origin;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_play_waits_for_delays() {
        let router = IntentRouter::new();
        let payload = router.quick_action(&mut SessionState::new(), QuickAction::Faq);
        let seq = DisplaySequence::from_payload(&payload, &PacingConfig::default(), Origin::QuickAction);
        let expected = seq.total_delay();
        let count = seq.len();

        let recorder = RecordingRenderer::new();
        let start = Instant::now();
        play(&recorder, "s1", seq).await.unwrap();

        assert!(start.elapsed() >= expected);
        assert!(start.elapsed() < expected + Duration::from_millis(50));
        assert_eq!(recorder.events().len(), count);
    }

    #[tokio::test]
    async fn test_recorder_keeps_order() {
        let router = IntentRouter::new();
        let payload = router.welcome();
        let seq = DisplaySequence::from_payload(&payload, &PacingConfig::immediate(), Origin::Welcome);

        let recorder = RecordingRenderer::new();
        play(&recorder, "s1", seq).await.unwrap();

        let texts = recorder.texts();
        assert_eq!(texts.len(), 3);
        assert!(texts[0].contains("HealthBot"));
        assert!(texts[1].starts_with("⚠️"));
    }
}
