use tokio::sync::oneshot;

use crate::brain::{QuickAction, ResponsePayload};

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the `ConversationActor`.
#[derive(Debug)]
pub enum ConversationMessage {
    /// A free-text message typed by the user in a specific session.
    UserText {
        session_id: String,
        text: String,
        /// A channel to send the routed response back once it has been displayed.
        responder: oneshot::Sender<Result<ResponsePayload, AppError>>,
    },
    /// A quick action button pressed in a specific session.
    QuickAction {
        session_id: String,
        action: QuickAction,
        responder: oneshot::Sender<Result<ResponsePayload, AppError>>,
    },
    /// Shows the greeting for a session without touching its state.
    Welcome {
        session_id: String,
        responder: oneshot::Sender<Result<ResponsePayload, AppError>>,
    },
    /// Clears a session (drops its flow state) and shows the greeting again.
    Reset {
        session_id: String,
        responder: oneshot::Sender<Result<ResponsePayload, AppError>>,
    },
    /// A command to stop the actor once queued messages ahead of it are handled.
    Shutdown,
}

impl ConversationMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ConversationMessage::UserText { .. } => "user_text",
            ConversationMessage::QuickAction { .. } => "quick_action",
            ConversationMessage::Welcome { .. } => "welcome",
            ConversationMessage::Reset { .. } => "reset",
            ConversationMessage::Shutdown => "shutdown",
        }
    }
}
