//! Slash commands understood by the terminal channel.

use crate::backend::ChatMode;

/// A terminal command. These never reach the conversation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Help,
    /// Connectivity, stage, chat mode and user id.
    Status,
    /// Show the profile (or the answers so far).
    Profile,
    /// `/mode` alone shows the current mode.
    Mode(Option<ChatMode>),
    InvalidMode(String),
    Quit,
    Unknown(String),
}

impl CliCommand {
    /// Parse a line of input. Returns `None` for anything that isn't a
    /// slash command, so it can go to the conversation.
    pub fn parse(content: &str) -> Option<CliCommand> {
        let trimmed = content.trim();
        if !trimmed.starts_with('/') {
            return None;
        }
        let lower = trimmed.to_lowercase();
        let mut parts = lower.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let arg = parts.next();

        let parsed = match command {
            "/help" | "/?" => CliCommand::Help,
            "/status" => CliCommand::Status,
            "/profile" => CliCommand::Profile,
            "/quit" | "/exit" => CliCommand::Quit,
            "/mode" => match arg {
                None => CliCommand::Mode(None),
                Some(value) => match ChatMode::parse(value) {
                    Some(mode) => CliCommand::Mode(Some(mode)),
                    None => CliCommand::InvalidMode(value.to_string()),
                },
            },
            other => CliCommand::Unknown(other.to_string()),
        };
        Some(parsed)
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  /status          connection, stage and chat mode
  /profile         your profile so far
  /mode quick|deep switch between quick tips and in-depth answers
  /help            this list
  /quit            leave (nothing is saved)
When choices are listed, type the choice or its number.";
