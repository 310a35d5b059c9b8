//! Conversation controller: owns one chat window's state and runs the
//! side effects the intake state machine asks for.

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::{BackendGateway, ChatMode};
use crate::config::ClientConfig;
use crate::onboarding::prompts::{greeting, offline_notice, plan_offline_notice, stage_prompt};
use crate::onboarding::{
    AthleteProfile, ConversationStage, Effect, Outcome, ProfileDraft, transition,
};

use super::message::{Message, MessageLog};

/// Whether the backend answered the startup health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Not checked yet.
    Unknown,
    Online,
    Offline,
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// One conversation: created when the chat opens, dropped when it closes.
///
/// All methods take `&mut self`, so at most one gateway call can be in
/// flight per conversation; callers must await each submission before
/// accepting the next input.
pub struct Conversation {
    user_id: String,
    stage: ConversationStage,
    draft: ProfileDraft,
    profile: Option<AthleteProfile>,
    log: MessageLog,
    connectivity: Connectivity,
    chat_mode: ChatMode,
    sessions_per_week: u32,
    gateway: Arc<dyn BackendGateway>,
}

impl Conversation {
    pub fn new(gateway: Arc<dyn BackendGateway>, config: &ClientConfig) -> Self {
        Self {
            user_id: format!("user_{}", Uuid::new_v4().simple()),
            stage: ConversationStage::default(),
            draft: ProfileDraft::default(),
            profile: None,
            log: MessageLog::new(),
            connectivity: Connectivity::Unknown,
            chat_mode: config.chat_mode,
            sessions_per_week: u32::from(config.sessions_per_week),
            gateway,
        }
    }

    /// Check connectivity and greet the user.
    ///
    /// Returns the messages appended. Does nothing once the greeting has
    /// already been shown.
    pub async fn open(&mut self) -> &[Message] {
        let start = self.log.len();
        if self.stage != ConversationStage::Greeting {
            return self.log.since(start);
        }

        self.check_connectivity().await;
        self.log.push(greeting());
        self.log
            .extend(stage_prompt(ConversationStage::CollectName, &self.draft.goals));
        self.stage = ConversationStage::CollectName;
        tracing::info!(user_id = %self.user_id, connectivity = %self.connectivity, "Conversation opened");
        self.log.since(start)
    }

    /// Ask the backend whether it is reachable and remember the answer.
    pub async fn check_connectivity(&mut self) -> Connectivity {
        self.connectivity = if self.gateway.check_health().await {
            Connectivity::Online
        } else {
            Connectivity::Offline
        };
        if self.connectivity == Connectivity::Offline {
            tracing::warn!("Backend unreachable; chat and plan generation are disabled");
        }
        self.connectivity
    }

    /// Feed one user input to the conversation.
    ///
    /// Returns the messages appended by this submission.
    pub async fn submit_answer(&mut self, raw_input: &str) -> &[Message] {
        let start = self.log.len();
        let step = transition(self.stage, &self.draft, raw_input, self.sessions_per_week);

        match &step.outcome {
            Outcome::Accepted => {
                tracing::debug!(from = %self.stage, to = %step.next_stage, "Answer accepted");
            }
            Outcome::Rejected(e) => {
                tracing::debug!(stage = %self.stage, reason = %e, "Answer rejected");
            }
            Outcome::Ignored => {}
        }

        match step.effect {
            None => {
                self.stage = step.next_stage;
                self.draft = step.draft;
                self.log.extend(step.messages);
            }
            Some(Effect::SendQuery(text)) => {
                if !self.ensure_online().await {
                    self.log.push(offline_notice());
                } else {
                    self.log.extend(step.messages);
                    let reply = self.query(&text, self.chat_mode).await;
                    self.log.push(reply);
                }
            }
            Some(Effect::GeneratePlan(profile)) => {
                self.stage = step.next_stage;
                self.draft = step.draft;
                self.log.extend(step.messages);
                self.generate_plan(profile).await;
            }
        }

        self.log.since(start)
    }

    /// Freeze the profile, submit it, and request the opening plan.
    ///
    /// Always ends in `FreeChat`; failures are logged as bot messages.
    async fn generate_plan(&mut self, profile: AthleteProfile) {
        self.profile = Some(profile.clone());

        if !self.ensure_online().await {
            self.log.push(plan_offline_notice());
        } else {
            match self.gateway.submit_profile(&self.user_id, &profile).await {
                Ok(ack) => {
                    tracing::debug!(message = %ack.message, "Backend stored profile");
                    let reply = self.query(&profile.plan_query(), ChatMode::InDepth).await;
                    self.log.push(reply);
                }
                Err(e) => {
                    tracing::warn!("Profile submission failed: {}", e);
                    self.log.push(Message::bot_error(&e.detail()));
                }
            }
        }

        self.stage = ConversationStage::FreeChat;
        tracing::info!(user_id = %self.user_id, sport = %profile.sport, "Intake complete");
    }

    async fn query(&self, text: &str, mode: ChatMode) -> Message {
        match self.gateway.send_query(text, &self.user_id, mode).await {
            Ok(reply) => reply.into_message(),
            Err(e) => {
                tracing::warn!("Chat query failed: {}", e);
                Message::bot_error(&e.detail())
            }
        }
    }

    /// Whether gateway calls may be made, checking once if never checked.
    async fn ensure_online(&mut self) -> bool {
        if self.connectivity == Connectivity::Unknown {
            self.check_connectivity().await;
        }
        self.connectivity == Connectivity::Online
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn stage(&self) -> ConversationStage {
        self.stage
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// The frozen profile, once the user has confirmed it.
    pub fn profile(&self) -> Option<&AthleteProfile> {
        self.profile.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn chat_mode(&self) -> ChatMode {
        self.chat_mode
    }

    pub fn set_chat_mode(&mut self, mode: ChatMode) {
        self.chat_mode = mode;
    }

    /// Summary of the confirmed profile, or of the answers so far.
    pub fn profile_summary(&self) -> String {
        match &self.profile {
            Some(profile) => profile.summary(),
            None => self.draft.summary(),
        }
    }
}
