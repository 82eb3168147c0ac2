//! Presentation side: paced display sequences and the renderer seam.

pub mod renderer;
pub mod sequence;

pub use renderer::{play, RecordingRenderer, Renderer};
pub use sequence::{Attachment, BotMessage, DisplayEvent, DisplayKind, DisplaySequence, Origin};
