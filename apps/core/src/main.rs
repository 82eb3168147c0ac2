// HealthBot terminal front end
// Reads chat input from stdin and renders paced bot replies on stdout.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Local;
use clap::Parser;
use healthbot_core::actors::ConversationHandle;
use healthbot_core::appointments::{format_time, AppointmentRequest};
use healthbot_core::brain::{KnowledgeBase, QuickAction};
use healthbot_core::config::{BotConfig, PacingConfig};
use healthbot_core::display::{Attachment, BotMessage, DisplayEvent, DisplayKind, Renderer};
use healthbot_core::{telemetry, AppError};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

/// HealthBot - clinic assistant in your terminal.
#[derive(Parser, Debug)]
#[command(name = "healthbot")]
#[command(version)]
#[command(about = "A rule-based healthcare assistant chat.", long_about = None)]
struct Cli {
    /// Show replies immediately instead of pacing them
    #[arg(long)]
    no_delay: bool,

    /// Print display events as JSON lines
    #[arg(long)]
    json: bool,

    /// Session identifier (random by default)
    #[arg(long)]
    session: Option<String>,
}

// --- Console Renderer ---
#[derive(Serialize)]
struct JsonEvent<'a> {
    session_id: &'a str,
    event: &'a DisplayEvent,
}

struct ConsoleRenderer {
    json: bool,
}

impl ConsoleRenderer {
    fn write(&self, text: &str) -> Result<(), AppError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }

    fn bot_line(&self, text: &str) -> String {
        let time = Local::now().format("%H:%M");
        format!("[{}] 🤖 {}", time, text.replace('\n', "\n         "))
    }

    fn attachment_lines(&self, attachment: &Attachment) -> Vec<String> {
        match attachment {
            Attachment::Faq { entry } => vec![
                format!("   ❓ {}", entry.question),
                format!("      {}", entry.answer),
            ],
            Attachment::Medication { entry } => vec![
                format!("   💊 {}", entry.name),
                format!("      Used for: {}", entry.use_for),
                format!("      ⚠️ Warning: {}", entry.warning),
            ],
            Attachment::Tip { tip } => vec![format!("   {}", tip)],
            Attachment::AppointmentForm {
                departments,
                time_slots,
            } => {
                let times: Vec<String> = time_slots
                    .iter()
                    .map(|t| format_time(t).unwrap_or_else(|_| t.clone()))
                    .collect();
                vec![
                    "   📅 Book Appointment".to_string(),
                    format!("      Departments: {}", departments.join(", ")),
                    format!("      Times: {}", times.join(", ")),
                    "      Submit with: /book name|phone|email|department|YYYY-MM-DD|HH:MM|reason"
                        .to_string(),
                ]
            }
            Attachment::EmergencyNotice {
                headline,
                instructions,
            } => {
                let mut lines = vec![format!("   🚨 {}", headline)];
                lines.extend(instructions.iter().map(|i| format!("      • {}", i)));
                lines
            }
            Attachment::Actions { actions } => {
                let buttons: Vec<String> = actions
                    .iter()
                    .map(|a| format!("[/{}] {}", a.id(), a.caption()))
                    .collect();
                vec![format!("   {}", buttons.join("  "))]
            }
        }
    }

    fn render_message(&self, message: &BotMessage) -> Result<(), AppError> {
        let mut lines = Vec::new();
        if let Some(text) = &message.text {
            lines.push(self.bot_line(text));
        }
        if let Some(attachment) = &message.attachment {
            lines.extend(self.attachment_lines(attachment));
        }
        self.write(&lines.join("\n"))
    }
}

#[async_trait]
impl Renderer for ConsoleRenderer {
    async fn render(&self, session_id: &str, event: &DisplayEvent) -> Result<(), AppError> {
        if self.json {
            let line = serde_json::to_string(&JsonEvent { session_id, event })?;
            return self.write(&line);
        }
        match &event.kind {
            DisplayKind::Typing => Ok(()),
            DisplayKind::Message(message) => self.render_message(message),
        }
    }
}

fn print_help(renderer: &ConsoleRenderer) -> Result<(), AppError> {
    let actions: Vec<String> = QuickAction::ALL.iter().map(|a| format!("/{}", a.id())).collect();
    renderer.write(&format!(
        "Commands: {}  /book <form>  /clear  /help  /quit",
        actions.join(" ")
    ))
}

fn book(renderer: &ConsoleRenderer, form: &str) -> Result<(), AppError> {
    let request: AppointmentRequest = form.parse()?;
    let confirmation = request.confirm(&KnowledgeBase, Local::now().date_naive())?;
    info!(department = %request.department, "Appointment request confirmed");
    renderer.write(&renderer.bot_line(&confirmation))
}

/// `/book` alone or followed by a space, so `/bookings` is not taken as a form
fn is_book_command(cmd: &str) -> bool {
    cmd == "book" || cmd.starts_with("book ")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, env_file) = BotConfig::load().context("Invalid HealthBot configuration")?;
    if cli.no_delay {
        config.pacing = PacingConfig::immediate();
    }
    telemetry::init(config.log_format)?;
    if let Some(path) = env_file {
        info!(path = %path.display(), "Loaded environment file");
    }
    info!(faq_match = ?config.faq_match, tip_count = config.tip_count, "HealthBot starting");

    let renderer = Arc::new(ConsoleRenderer { json: cli.json });
    let handle = ConversationHandle::new(&config, renderer.clone());
    let session_id = cli.session.unwrap_or_else(ConversationHandle::new_session_id);

    handle.welcome(&session_id).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let result = match input.strip_prefix('/') {
            Some("quit") | Some("exit") => break,
            Some("help") => print_help(&renderer),
            Some("clear") => handle.reset(&session_id).await.map(|_| ()),
            Some(cmd) if is_book_command(cmd) => book(&renderer, cmd["book".len()..].trim()),
            Some(cmd) => match cmd.parse::<QuickAction>() {
                Ok(action) => handle.quick_action(&session_id, action).await.map(|_| ()),
                Err(e) => {
                    warn!("{}", e);
                    print_help(&renderer)
                }
            },
            None => handle.send_text(&session_id, input).await.map(|_| ()),
        };

        if let Err(e) = result {
            error!("{}", e);
            renderer.write(&renderer.bot_line(&format!("Sorry, something went wrong: {}", e)))?;
        }
    }

    handle.shutdown().await?;
    info!("HealthBot stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_command_matching() {
        assert!(is_book_command("book"));
        assert!(is_book_command("book A|5551234567||Pediatrics|2026-11-02|09:00"));
        assert!(!is_book_command("bookings"));
        assert!(!is_book_command("booking A|B"));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["healthbot", "--no-delay", "--session", "abc"]);
        assert!(cli.no_delay);
        assert!(!cli.json);
        assert_eq!(cli.session.as_deref(), Some("abc"));
    }
}
