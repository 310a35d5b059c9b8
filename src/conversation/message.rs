//! Chat messages and the append-only conversation log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix that marks a bot message carrying a backend failure.
pub const ERROR_PREFIX: &str = "⚠️ Error:";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// Selectable choices attached to a bot prompt.
///
/// Advisory only: typing the same text is always accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageOptions {
    Buttons { choices: Vec<String> },
}

impl MessageOptions {
    pub fn buttons<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Buttons {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn choices(&self) -> &[String] {
        match self {
            Self::Buttons { choices } => choices,
        }
    }
}

/// Per-exercise scores returned by the coach (both on a 0–10 scale).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub exercise_name: String,
    pub risk_value: u8,
    pub effectiveness_value: u8,
}

impl RiskScore {
    /// Coarse risk bucket used when rendering.
    pub fn risk_level(&self) -> &'static str {
        match self.risk_value {
            7.. => "high",
            5..=6 => "moderate",
            _ => "low",
        }
    }
}

/// A tutorial video for one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialLink {
    pub exercise_name: String,
    pub url: String,
}

/// One entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<MessageOptions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_scores: Vec<RiskScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tutorial_links: Vec<TutorialLink>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// A bot message reporting a failed backend call.
    pub fn bot_error(detail: &str) -> Self {
        Self::bot(format!("{ERROR_PREFIX} {detail}"))
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            options: None,
            risk_scores: Vec::new(),
            tutorial_links: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_options(mut self, options: MessageOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_risk_scores(mut self, scores: Vec<RiskScore>) -> Self {
        self.risk_scores = scores;
        self
    }

    pub fn with_tutorial_links(mut self, links: Vec<TutorialLink>) -> Self {
        self.tutorial_links = links;
        self
    }

    pub fn is_error(&self) -> bool {
        self.sender == Sender::Bot && self.text.starts_with(ERROR_PREFIX)
    }
}

/// Chronological, append-only message log.
///
/// Messages can be read but never changed or removed once pushed.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Messages appended at or after position `start`.
    pub fn since(&self, start: usize) -> &[Message] {
        &self.messages[start.min(self.messages.len())..]
    }

    /// The most recent bot message that offers choices, if it is also the
    /// most recent bot message overall.
    pub fn current_options(&self) -> Option<&MessageOptions> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.sender == Sender::Bot)
            .and_then(|m| m.options.as_ref())
    }
}
