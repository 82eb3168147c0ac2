use crate::actors::messages::{AppError, ConversationMessage};
use crate::brain::{IntentRouter, QuickAction, ResponsePayload, SessionState};
use crate::config::{BotConfig, PacingConfig};
use crate::display::{play, DisplaySequence, Origin, Renderer};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Capacity of the inbound queue; senders wait when it is full.
const QUEUE_CAPACITY: usize = 32;

/// A handle to the `ConversationActor`.
///
/// This is the entry point for front ends. Every request goes through one
/// queue and is handled to completion, display included, before the next
/// one starts, so replies never interleave.
#[derive(Clone)]
pub struct ConversationHandle {
    sender: mpsc::Sender<ConversationMessage>,
    response_timeout: Duration,
}

impl ConversationHandle {
    /// Spawns the actor with the given configuration and renderer.
    pub fn new<R: Renderer>(config: &BotConfig, renderer: Arc<R>) -> Self {
        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
        let runner = ConversationRunner::new(receiver, config, renderer);
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            response_timeout: config.response_timeout(),
        }
    }

    /// A fresh session identifier.
    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Routes a user message and waits until its response has been displayed.
    ///
    /// Empty or whitespace-only text is rejected before it reaches the queue.
    #[instrument(skip(self, text))]
    pub async fn send_text(&self, session_id: &str, text: &str) -> Result<ResponsePayload, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Message cannot be empty".to_string()));
        }

        let (send, recv) = oneshot::channel();
        self.dispatch(
            ConversationMessage::UserText {
                session_id: session_id.to_string(),
                text: text.to_string(),
                responder: send,
            },
            recv,
        )
        .await
    }

    /// Triggers a quick action and waits until its response has been displayed.
    #[instrument(skip(self))]
    pub async fn quick_action(
        &self,
        session_id: &str,
        action: QuickAction,
    ) -> Result<ResponsePayload, AppError> {
        let (send, recv) = oneshot::channel();
        self.dispatch(
            ConversationMessage::QuickAction {
                session_id: session_id.to_string(),
                action,
                responder: send,
            },
            recv,
        )
        .await
    }

    /// Shows the greeting for a session.
    #[instrument(skip(self))]
    pub async fn welcome(&self, session_id: &str) -> Result<ResponsePayload, AppError> {
        let (send, recv) = oneshot::channel();
        self.dispatch(
            ConversationMessage::Welcome {
                session_id: session_id.to_string(),
                responder: send,
            },
            recv,
        )
        .await
    }

    /// Clears the session and shows the greeting again.
    #[instrument(skip(self))]
    pub async fn reset(&self, session_id: &str) -> Result<ResponsePayload, AppError> {
        let (send, recv) = oneshot::channel();
        self.dispatch(
            ConversationMessage::Reset {
                session_id: session_id.to_string(),
                responder: send,
            },
            recv,
        )
        .await
    }

    /// Stops the actor after the requests already queued.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(ConversationMessage::Shutdown)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))
    }

    async fn dispatch(
        &self,
        msg: ConversationMessage,
        recv: oneshot::Receiver<Result<ResponsePayload, AppError>>,
    ) -> Result<ResponsePayload, AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.response_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }
}

// --- Actor Runner ---
struct ConversationRunner<R>
where
    R: Renderer,
{
    receiver: mpsc::Receiver<ConversationMessage>,
    router: IntentRouter,
    sessions: LruCache<String, SessionState>,
    renderer: Arc<R>,
    pacing: PacingConfig,
}

impl<R> ConversationRunner<R>
where
    R: Renderer,
{
    fn new(receiver: mpsc::Receiver<ConversationMessage>, config: &BotConfig, renderer: Arc<R>) -> Self {
        let capacity = NonZeroUsize::new(config.session_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            receiver,
            router: IntentRouter::with_options(config.router_options()),
            sessions: LruCache::new(capacity),
            renderer,
            pacing: config.pacing,
        }
    }

    async fn run(mut self) {
        info!("Conversation actor started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, ConversationMessage::Shutdown) {
                info!("Shutdown requested");
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Conversation actor stopped");
    }

    #[instrument(skip(self, msg), fields(message_type = msg.kind()))]
    async fn handle_message(&mut self, msg: ConversationMessage) {
        match msg {
            ConversationMessage::UserText {
                session_id,
                text,
                responder,
            } => {
                let mut state = self.take_session(&session_id);
                let payload = self.router.route(&mut state, &text);
                self.store_session(&session_id, state);
                let result = self.display(&session_id, payload, Origin::Message).await;
                reply(responder, result);
            }
            ConversationMessage::QuickAction {
                session_id,
                action,
                responder,
            } => {
                let mut state = self.take_session(&session_id);
                let payload = self.router.quick_action(&mut state, action);
                self.store_session(&session_id, state);
                let result = self.display(&session_id, payload, Origin::QuickAction).await;
                reply(responder, result);
            }
            ConversationMessage::Welcome {
                session_id,
                responder,
            } => {
                let payload = self.router.welcome();
                let result = self.display(&session_id, payload, Origin::Welcome).await;
                reply(responder, result);
            }
            ConversationMessage::Reset {
                session_id,
                responder,
            } => {
                if self.sessions.pop(&session_id).is_some() {
                    debug!(session_id = %session_id, "Session state cleared");
                }
                let payload = self.router.welcome();
                let result = self.display(&session_id, payload, Origin::Welcome).await;
                reply(responder, result);
            }
            ConversationMessage::Shutdown => {}
        }
    }

    /// Removes the session's state for the duration of a request
    fn take_session(&mut self, session_id: &str) -> SessionState {
        self.sessions.pop(session_id).unwrap_or_default()
    }

    /// Puts the state back as most recently used, evicting the oldest session when full
    fn store_session(&mut self, session_id: &str, state: SessionState) {
        if let Some((evicted, _)) = self.sessions.push(session_id.to_string(), state) {
            if evicted != session_id {
                warn!(session_id = %evicted, "Session evicted from memory");
            }
        }
    }

    async fn display(
        &self,
        session_id: &str,
        payload: ResponsePayload,
        origin: Origin,
    ) -> Result<ResponsePayload, AppError> {
        let sequence = DisplaySequence::from_payload(&payload, &self.pacing, origin);
        debug!(session_id = %session_id, events = sequence.len(), "Playing display sequence");
        play(self.renderer.as_ref(), session_id, sequence).await?;
        Ok(payload)
    }
}

fn reply(
    responder: oneshot::Sender<Result<ResponsePayload, AppError>>,
    result: Result<ResponsePayload, AppError>,
) {
    if let Err(e) = &result {
        error!("Error processing conversation message: {:?}", e);
    }
    if responder.send(result).is_err() {
        warn!("Requester dropped before the response was delivered");
    }
}
