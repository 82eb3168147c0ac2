//! Runtime configuration.
//!
//! Values come from `HEALTHBOT_*` environment variables (optionally loaded
//! from a `.env` file) and fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::brain::{FaqMatchRule, RouterOptions};
use crate::error::AppError;

const ENV_PREFIX: &str = "HEALTHBOT_";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Delays used to pace bot messages, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PacingConfig {
    /// Before the greeting when a conversation opens or is cleared
    #[validate(range(max = 60000))]
    pub welcome_delay_ms: u64,
    /// Typing indicator before answering a free-text message
    #[validate(range(max = 60000))]
    pub typing_delay_ms: u64,
    /// Typing indicator before answering a quick action
    #[validate(range(max = 60000))]
    pub quick_action_delay_ms: u64,
    #[validate(range(max = 60000))]
    pub faq_stagger_ms: u64,
    #[validate(range(max = 60000))]
    pub medication_stagger_ms: u64,
    #[validate(range(max = 60000))]
    pub tip_stagger_ms: u64,
    /// Before an appointment form or emergency notice
    #[validate(range(max = 60000))]
    pub notice_delay_ms: u64,
    /// Before follow-up prompts and text-only closings
    #[validate(range(max = 60000))]
    pub follow_up_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            welcome_delay_ms: 500,
            typing_delay_ms: 1000,
            quick_action_delay_ms: 800,
            faq_stagger_ms: 500,
            medication_stagger_ms: 300,
            tip_stagger_ms: 400,
            notice_delay_ms: 500,
            follow_up_delay_ms: 1000,
        }
    }
}

impl PacingConfig {
    /// Pacing with every delay set to zero
    pub fn immediate() -> Self {
        Self {
            welcome_delay_ms: 0,
            typing_delay_ms: 0,
            quick_action_delay_ms: 0,
            faq_stagger_ms: 0,
            medication_stagger_ms: 0,
            tip_stagger_ms: 0,
            notice_delay_ms: 0,
            follow_up_delay_ms: 0,
        }
    }

    pub fn welcome_delay(&self) -> Duration {
        Duration::from_millis(self.welcome_delay_ms)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn quick_action_delay(&self) -> Duration {
        Duration::from_millis(self.quick_action_delay_ms)
    }

    pub fn faq_stagger(&self) -> Duration {
        Duration::from_millis(self.faq_stagger_ms)
    }

    pub fn medication_stagger(&self) -> Duration {
        Duration::from_millis(self.medication_stagger_ms)
    }

    pub fn tip_stagger(&self) -> Duration {
        Duration::from_millis(self.tip_stagger_ms)
    }

    pub fn notice_delay(&self) -> Duration {
        Duration::from_millis(self.notice_delay_ms)
    }

    pub fn follow_up_delay(&self) -> Duration {
        Duration::from_millis(self.follow_up_delay_ms)
    }
}

/// Complete bot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BotConfig {
    #[validate(nested)]
    pub pacing: PacingConfig,
    /// Tips shown by the `tips` quick action
    #[validate(range(min = 1, max = 8))]
    pub tip_count: usize,
    pub faq_match: FaqMatchRule,
    /// Conversations kept in memory before the least recent is evicted
    #[validate(range(min = 1, max = 100000))]
    pub session_capacity: usize,
    /// Upper bound for one queued request, including its display time
    #[validate(range(min = 1, max = 3600))]
    pub response_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            pacing: PacingConfig::default(),
            tip_count: 5,
            faq_match: FaqMatchRule::Keywords,
            session_capacity: 256,
            response_timeout_secs: 120,
            log_format: LogFormat::Pretty,
        }
    }
}

impl BotConfig {
    /// Load `.env` from the working directory (if any), then read the environment.
    ///
    /// Also returns the `.env` path that was applied, so it can be logged
    /// once tracing is installed.
    pub fn load() -> Result<(Self, Option<PathBuf>), AppError> {
        let env_file = dotenv::dotenv().ok();
        Ok((Self::from_env()?, env_file))
    }

    /// Load variables from a specific env file, then read the environment
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        dotenv::from_path(path)
            .map_err(|e| AppError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_env()
    }

    /// Read `HEALTHBOT_*` variables over the defaults and validate the result
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = BotConfig::default();
        let pacing = PacingConfig {
            welcome_delay_ms: env_or("WELCOME_DELAY_MS", defaults.pacing.welcome_delay_ms)?,
            typing_delay_ms: env_or("TYPING_DELAY_MS", defaults.pacing.typing_delay_ms)?,
            quick_action_delay_ms: env_or(
                "QUICK_ACTION_DELAY_MS",
                defaults.pacing.quick_action_delay_ms,
            )?,
            faq_stagger_ms: env_or("FAQ_STAGGER_MS", defaults.pacing.faq_stagger_ms)?,
            medication_stagger_ms: env_or(
                "MEDICATION_STAGGER_MS",
                defaults.pacing.medication_stagger_ms,
            )?,
            tip_stagger_ms: env_or("TIP_STAGGER_MS", defaults.pacing.tip_stagger_ms)?,
            notice_delay_ms: env_or("NOTICE_DELAY_MS", defaults.pacing.notice_delay_ms)?,
            follow_up_delay_ms: env_or("FOLLOW_UP_DELAY_MS", defaults.pacing.follow_up_delay_ms)?,
        };

        let config = BotConfig {
            pacing,
            tip_count: env_or("TIP_COUNT", defaults.tip_count)?,
            faq_match: env_or("FAQ_MATCH", defaults.faq_match)?,
            session_capacity: env_or("SESSION_CAPACITY", defaults.session_capacity)?,
            response_timeout_secs: env_or(
                "RESPONSE_TIMEOUT_SECS",
                defaults.response_timeout_secs,
            )?,
            log_format: env_or("LOG_FORMAT", defaults.log_format)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            faq_match: self.faq_match,
            tip_count: self.tip_count,
        }
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }
}

/// Parse `HEALTHBOT_<suffix>` or return `default` when unset or blank
fn env_or<T>(suffix: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    let key = format!("{}{}", ENV_PREFIX, suffix);
    match std::env::var(&key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("{}: {}", key, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pacing.typing_delay(), Duration::from_millis(1000));
        assert_eq!(config.router_options().tip_count, 5);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_immediate_pacing() {
        let pacing = PacingConfig::immediate();
        assert!(pacing.welcome_delay().is_zero());
        assert!(pacing.tip_stagger().is_zero());
        assert!(pacing.follow_up_delay().is_zero());
    }

    #[test]
    fn test_invalid_tip_count_fails_validation() {
        let config = BotConfig {
            tip_count: 0,
            ..BotConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
