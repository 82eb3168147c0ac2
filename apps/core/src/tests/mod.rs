//! Test Module
//!
//! Test suite for the HealthBot core.
//!
//! ## Test Categories
//! - `brain_tests`: Classification priority, triage, lookups, routing
//! - `actor_tests`: Conversation actor queueing, sessions, validation
//! - `config_tests`: Environment and `.env` configuration loading
//! - `integration_tests`: Full conversations through the actor and renderer

pub mod integration_tests;
