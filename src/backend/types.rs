//! Wire types for the coaching backend's JSON API.

use serde::{Deserialize, Serialize};

use crate::conversation::{Message, RiskScore, TutorialLink};
use crate::onboarding::AthleteProfile;

/// How much detail the coach should put into an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatMode {
    #[serde(rename = "quick-tip")]
    QuickTip,
    #[serde(rename = "in-depth")]
    InDepth,
}

impl ChatMode {
    /// Parse a wire value or a short alias.
    pub fn parse(input: &str) -> Option<ChatMode> {
        match input.trim().to_lowercase().as_str() {
            "quick-tip" | "quick" | "tip" => Some(Self::QuickTip),
            "in-depth" | "deep" | "detailed" => Some(Self::InDepth),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuickTip => write!(f, "quick-tip"),
            Self::InDepth => write!(f, "in-depth"),
        }
    }
}

/// `POST /api/chat` body.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub text: &'a str,
    pub user_id: &'a str,
    pub mode: ChatMode,
}

/// `POST /api/profile/create` body.
#[derive(Debug, Serialize)]
pub(crate) struct ProfileRequest<'a> {
    pub user_id: &'a str,
    #[serde(flatten)]
    pub profile: &'a AthleteProfile,
    /// Not collected by the intake flow.
    pub available_equipment: Vec<String>,
    /// Not collected by the intake flow.
    pub dietary_restrictions: Vec<String>,
}

/// `POST /api/chat` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatResponse {
    pub response_text: String,
    #[serde(default)]
    pub risk_scores: Vec<RiskScoreItem>,
    #[serde(default)]
    pub youtube_links: Vec<YoutubeLinkItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RiskScoreItem {
    pub exercise: String,
    pub risk: u8,
    pub effectiveness: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct YoutubeLinkItem {
    pub exercise: String,
    pub url: String,
}

/// A structured answer from the coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachReply {
    pub text: String,
    pub risk_scores: Vec<RiskScore>,
    pub tutorial_links: Vec<TutorialLink>,
}

impl CoachReply {
    /// The single bot message that carries this reply.
    pub fn into_message(self) -> Message {
        Message::bot(self.text)
            .with_risk_scores(self.risk_scores)
            .with_tutorial_links(self.tutorial_links)
    }
}

impl From<ChatResponse> for CoachReply {
    fn from(response: ChatResponse) -> Self {
        Self {
            text: response.response_text,
            risk_scores: response
                .risk_scores
                .into_iter()
                .map(|item| RiskScore {
                    exercise_name: item.exercise,
                    risk_value: item.risk.min(10),
                    effectiveness_value: item.effectiveness.min(10),
                })
                .collect(),
            tutorial_links: response
                .youtube_links
                .into_iter()
                .map(|item| TutorialLink {
                    exercise_name: item.exercise,
                    url: item.url,
                })
                .collect(),
        }
    }
}

/// Acknowledgement from `POST /api/profile/create`. Every field is optional;
/// the client only logs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: String,
}

/// Body of `GET /api/health`. Only the HTTP status decides reachability.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub ai_engine: Option<String>,
    #[serde(default)]
    pub risk_module: Option<String>,
}
