//! Actor layer: a single conversation actor that queues user input and
//! plays each response before handling the next one.

pub mod conversation;
pub mod messages;

pub use conversation::ConversationHandle;
pub use messages::ConversationMessage;
