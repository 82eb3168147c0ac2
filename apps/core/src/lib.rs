//! HealthBot core: a rule-based clinic assistant.
//!
//! Free-text messages are classified by keyword priority and answered with
//! canned responses; quick actions select a response directly. Responses are
//! turned into paced display sequences and played by a [`display::Renderer`].

pub mod actors;
pub mod appointments;
pub mod brain;
pub mod config;
pub mod display;
pub mod error;
pub mod telemetry;

pub use error::AppError;

#[cfg(test)]
mod tests;
