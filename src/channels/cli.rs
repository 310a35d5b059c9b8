//! CLI channel: the chat window as a stdin/stdout REPL.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::conversation::{Connectivity, Conversation, Message, MessageOptions, RiskScore, Sender};
use crate::error::Result;

use super::command::{CliCommand, HELP_TEXT};

const BAR_WIDTH: usize = 10;

/// Runs one conversation against the terminal.
///
/// A line is only read after the previous submission has finished, so the
/// input surface stays closed while a backend call is outstanding.
pub struct CliChannel {
    conversation: Conversation,
}

impl CliChannel {
    pub fn new(conversation: Conversation) -> Self {
        Self { conversation }
    }

    /// Open the conversation and serve input until EOF or `/quit`.
    pub async fn run(mut self) -> Result<()> {
        let opened = self.conversation.open().await;
        for message in opened {
            println!("\n{}", render_message(message));
        }
        if self.conversation.connectivity() == Connectivity::Offline {
            eprintln!("🔴 Coach Carter is offline. You can still build your profile.");
        }
        self.prompt();

        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                self.prompt();
                continue;
            }

            if let Some(command) = CliCommand::parse(line) {
                if command == CliCommand::Quit {
                    break;
                }
                self.handle_command(command);
                self.prompt();
                continue;
            }

            let input = select_option(line, self.conversation.log().current_options());
            if self.expects_backend_call() {
                eprintln!("⏳ Coach Carter is thinking...");
            }
            let appended = self.conversation.submit_answer(&input).await;
            for message in appended.iter().filter(|m| m.sender == Sender::Bot) {
                println!("\n{}", render_message(message));
            }
            self.prompt();
        }

        tracing::info!(user_id = %self.conversation.user_id(), "Conversation closed");
        Ok(())
    }

    fn handle_command(&mut self, command: CliCommand) {
        match command {
            CliCommand::Help => println!("{HELP_TEXT}"),
            CliCommand::Status => println!(
                "Backend: {}\nStage: {}\nMode: {}\nUser id: {}",
                self.conversation.connectivity(),
                self.conversation.stage(),
                self.conversation.chat_mode(),
                self.conversation.user_id(),
            ),
            CliCommand::Profile => {
                let summary = self.conversation.profile_summary();
                if summary.is_empty() {
                    println!("No answers yet.");
                } else {
                    println!("{summary}");
                }
            }
            CliCommand::Mode(None) => println!("Mode: {}", self.conversation.chat_mode()),
            CliCommand::Mode(Some(mode)) => {
                self.conversation.set_chat_mode(mode);
                println!("Mode set to {mode}.");
            }
            CliCommand::InvalidMode(value) => {
                println!("Unknown mode \"{value}\". Use /mode quick or /mode deep.")
            }
            CliCommand::Unknown(name) => println!("Unknown command {name}. Type /help."),
            CliCommand::Quit => {}
        }
    }

    fn expects_backend_call(&self) -> bool {
        use crate::onboarding::ConversationStage;
        self.conversation.connectivity() != Connectivity::Offline
            && matches!(
                self.conversation.stage(),
                ConversationStage::Confirm | ConversationStage::FreeChat
            )
    }

    fn prompt(&self) {
        if self.conversation.connectivity() == Connectivity::Offline {
            eprint!("(offline) > ");
        } else {
            eprint!("> ");
        }
    }
}

/// Map a bare number to the matching listed choice; anything else passes
/// through unchanged.
pub fn select_option(input: &str, options: Option<&MessageOptions>) -> String {
    let Some(options) = options else {
        return input.to_string();
    };
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= options.choices().len() => options.choices()[n - 1].clone(),
        _ => input.to_string(),
    }
}

/// Render a message for the terminal.
pub fn render_message(message: &Message) -> String {
    let mut out = match message.sender {
        Sender::Bot => format!("🤖 {}", message.text),
        Sender::User => format!("🧑 {}", message.text),
    };

    if let Some(options) = &message.options {
        let choices: Vec<String> = options
            .choices()
            .iter()
            .enumerate()
            .map(|(i, choice)| format!("[{}] {choice}", i + 1))
            .collect();
        out.push_str("\n   ");
        out.push_str(&choices.join("  "));
    }

    for score in &message.risk_scores {
        out.push('\n');
        out.push_str(&render_score(score));
    }

    for link in &message.tutorial_links {
        out.push_str(&format!("\n   🎥 {}: {}", link.exercise_name, link.url));
    }
    out
}

fn render_score(score: &RiskScore) -> String {
    format!(
        "   📊 {}  ⚠️ risk {}/10 {} ({})  💪 effectiveness {}/10 {}",
        score.exercise_name,
        score.risk_value,
        bar(score.risk_value),
        score.risk_level(),
        score.effectiveness_value,
        bar(score.effectiveness_value),
    )
}

fn bar(value: u8) -> String {
    let filled = usize::from(value.min(10));
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
