//! End-to-end conversation tests against a recording stub gateway.
//!
//! No network: the stub records every call so tests can assert exactly which
//! backend operations a conversation triggered.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use coach_carter::backend::{BackendGateway, ChatMode, CoachReply, ProfileAck};
use coach_carter::config::ClientConfig;
use coach_carter::conversation::{Connectivity, Conversation, RiskScore, Sender, TutorialLink};
use coach_carter::error::BackendError;
use coach_carter::onboarding::prompts::{OFFLINE_NOTICE, PLAN_OFFLINE_NOTICE};
use coach_carter::onboarding::{AthleteProfile, ConversationStage, Gender};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Health,
    Profile {
        user_id: String,
        profile: AthleteProfile,
    },
    Query {
        text: String,
        user_id: String,
        mode: ChatMode,
    },
}

/// Stub gateway with switchable failures.
struct RecordingGateway {
    healthy: bool,
    fail_profile: AtomicBool,
    fail_queries: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl RecordingGateway {
    fn new(healthy: bool) -> Arc<Self> {
        Arc::new(Self {
            healthy,
            fail_profile: AtomicBool::new(false),
            fail_queries: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl BackendGateway for RecordingGateway {
    async fn check_health(&self) -> bool {
        self.calls.lock().unwrap().push(Call::Health);
        self.healthy
    }

    async fn submit_profile(
        &self,
        user_id: &str,
        profile: &AthleteProfile,
    ) -> Result<ProfileAck, BackendError> {
        self.calls.lock().unwrap().push(Call::Profile {
            user_id: user_id.to_string(),
            profile: profile.clone(),
        });
        if self.fail_profile.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                endpoint: "/api/profile/create".into(),
                status: 400,
                detail: "Invalid profile".into(),
            });
        }
        Ok(ProfileAck {
            success: true,
            message: "saved".into(),
            user_id: user_id.to_string(),
        })
    }

    async fn send_query(
        &self,
        text: &str,
        user_id: &str,
        mode: ChatMode,
    ) -> Result<CoachReply, BackendError> {
        self.calls.lock().unwrap().push(Call::Query {
            text: text.to_string(),
            user_id: user_id.to_string(),
            mode,
        });
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                endpoint: "/api/chat".into(),
                status: 500,
                detail: "Failed to generate response: model overloaded".into(),
            });
        }
        Ok(CoachReply {
            text: format!("Plan for: {text}"),
            risk_scores: vec![RiskScore {
                exercise_name: "Back Squat".into(),
                risk_value: 5,
                effectiveness_value: 9,
            }],
            tutorial_links: vec![TutorialLink {
                exercise_name: "Back Squat".into(),
                url: "https://youtube.com/watch?v=squat".into(),
            }],
        })
    }

    async fn fetch_profile(&self, _user_id: &str) -> Result<Option<AthleteProfile>, BackendError> {
        Ok(None)
    }
}

const INTAKE: [&str; 12] = [
    "Alex",
    "28",
    "Male",
    "180",
    "75",
    "none",
    "🏀 Basketball",
    "5",
    "12",
    "strength",
    "Done",
    "Yes, Generate Plan!",
];

async fn open(gateway: &Arc<RecordingGateway>) -> Conversation {
    let mut conv = Conversation::new(gateway.clone(), &ClientConfig::default());
    conv.open().await;
    conv
}

async fn answer_all(conv: &mut Conversation, inputs: &[&str]) {
    for input in inputs {
        conv.submit_answer(input).await;
    }
}

fn expected_profile() -> AthleteProfile {
    AthleteProfile {
        name: "Alex".into(),
        age: 28,
        gender: Gender::Male,
        height_cm: 180.0,
        weight_kg: 75.0,
        injuries: vec![],
        sport: "basketball".into(),
        experience_years: 5,
        duration_weeks: 12,
        goals: vec!["strength".into()],
        sessions_per_week: 5,
    }
}

#[tokio::test]
async fn full_intake_submits_profile_and_one_plan_query() {
    let gateway = RecordingGateway::new(true);
    let mut conv = open(&gateway).await;
    answer_all(&mut conv, &INTAKE).await;

    assert_eq!(conv.stage(), ConversationStage::FreeChat);
    assert_eq!(conv.profile(), Some(&expected_profile()));

    let calls = gateway.calls();
    assert_eq!(calls.len(), 3, "health + profile + query, got {calls:?}");
    assert_eq!(calls[0], Call::Health);
    assert_eq!(
        calls[1],
        Call::Profile {
            user_id: conv.user_id().to_string(),
            profile: expected_profile(),
        }
    );
    match &calls[2] {
        Call::Query {
            text,
            user_id,
            mode,
        } => {
            assert_eq!(user_id, conv.user_id());
            assert_eq!(*mode, ChatMode::InDepth);
            assert!(text.contains("basketball"));
            assert!(text.contains("28-year-old"));
            assert!(text.contains("5 years of experience"));
            assert!(text.contains("strength"));
        }
        other => panic!("expected a query, got {other:?}"),
    }

    let last = conv.messages().last().unwrap();
    assert_eq!(last.sender, Sender::Bot);
    assert!(last.text.starts_with("Plan for:"));
    assert_eq!(last.risk_scores.len(), 1);
    assert_eq!(last.tutorial_links.len(), 1);
}

#[tokio::test]
async fn every_accepted_answer_logs_user_then_bot() {
    let gateway = RecordingGateway::new(true);
    let mut conv = open(&gateway).await;

    for input in &INTAKE[..11] {
        let appended = conv.submit_answer(input).await;
        assert!(appended.len() >= 2, "{input:?} appended {}", appended.len());
        assert_eq!(appended[0].sender, Sender::User);
        assert_eq!(appended[0].text, *input);
        assert!(appended[1..].iter().all(|m| m.sender == Sender::Bot));
    }
    assert_eq!(conv.stage(), ConversationStage::Confirm);
    assert!(conv.messages().last().unwrap().text.contains("Alex"));
}

#[tokio::test]
async fn out_of_range_answers_do_not_advance() {
    let gateway = RecordingGateway::new(true);
    let mut conv = open(&gateway).await;
    conv.submit_answer("Alex").await;

    for bad in ["5", "150", "abc"] {
        let appended = conv.submit_answer(bad).await;
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].sender, Sender::Bot);
        assert_eq!(conv.stage(), ConversationStage::CollectAge);
        assert_eq!(conv.draft().age, None);
    }

    conv.submit_answer("100").await;
    assert_eq!(conv.stage(), ConversationStage::CollectGender);
    assert_eq!(conv.draft().age, Some(100));
}

#[tokio::test]
async fn injuries_are_parsed_and_phrased_as_exclusions() {
    let gateway = RecordingGateway::new(true);
    let mut conv = open(&gateway).await;
    let mut inputs = INTAKE;
    inputs[5] = "knee pain, lower back";
    answer_all(&mut conv, &inputs).await;

    let profile = conv.profile().unwrap();
    assert_eq!(profile.injuries, vec!["knee pain".to_string(), "lower back".to_string()]);
    let query = gateway
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::Query { text, .. } => Some(text),
            _ => None,
        })
        .unwrap();
    assert!(query.contains("knee pain, lower back"));
}

#[tokio::test]
async fn custom_sport_bypasses_catalog() {
    let gateway = RecordingGateway::new(true);
    let mut conv = open(&gateway).await;
    answer_all(&mut conv, &INTAKE[..6]).await;

    conv.submit_answer("➕ Other Sport").await;
    assert_eq!(conv.stage(), ConversationStage::CollectCustomSport);
    conv.submit_answer("Pickleball").await;
    assert_eq!(conv.stage(), ConversationStage::CollectExperience);

    answer_all(&mut conv, &INTAKE[7..]).await;
    assert_eq!(conv.profile().unwrap().sport, "pickleball");
}

#[tokio::test]
async fn repeated_goal_is_not_duplicated() {
    let gateway = RecordingGateway::new(true);
    let mut conv = open(&gateway).await;
    answer_all(&mut conv, &INTAKE[..9]).await;
    answer_all(&mut conv, &["strength", "speed", "Strength", "Done"]).await;

    assert_eq!(conv.stage(), ConversationStage::Confirm);
    conv.submit_answer("Yes, Generate Plan!").await;
    assert_eq!(
        conv.profile().unwrap().goals,
        vec!["strength".to_string(), "speed".to_string()]
    );
}

#[tokio::test]
async fn edit_profile_discards_all_answers() {
    let gateway = RecordingGateway::new(true);
    let mut conv = open(&gateway).await;
    answer_all(&mut conv, &INTAKE[..11]).await;
    assert_eq!(conv.stage(), ConversationStage::Confirm);

    conv.submit_answer("Edit Profile").await;
    assert_eq!(conv.stage(), ConversationStage::CollectName);
    assert!(conv.draft().is_empty());
    assert!(conv.profile().is_none());
    assert_eq!(conv.messages().last().unwrap().text, "What's your name?");

    let mut inputs = INTAKE;
    inputs[0] = "Sam";
    answer_all(&mut conv, &inputs).await;
    assert_eq!(conv.profile().unwrap().name, "Sam");
    assert_eq!(gateway.count(|c| matches!(c, Call::Profile { .. })), 1);
}

#[tokio::test]
async fn offline_intake_completes_without_network_calls() {
    let gateway = RecordingGateway::new(false);
    let mut conv = open(&gateway).await;
    assert_eq!(conv.connectivity(), Connectivity::Offline);

    answer_all(&mut conv, &INTAKE).await;
    assert_eq!(conv.stage(), ConversationStage::FreeChat);
    assert_eq!(conv.profile(), Some(&expected_profile()));
    assert_eq!(conv.messages().last().unwrap().text, PLAN_OFFLINE_NOTICE);
    assert_eq!(gateway.calls(), vec![Call::Health]);
}

#[tokio::test]
async fn offline_free_chat_sends_nothing() {
    let gateway = RecordingGateway::new(false);
    let mut conv = open(&gateway).await;
    answer_all(&mut conv, &INTAKE).await;
    let before = conv.messages().len();

    let appended = conv.submit_answer("What should I eat before a game?").await;
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].sender, Sender::Bot);
    assert_eq!(appended[0].text, OFFLINE_NOTICE);
    assert_eq!(conv.messages().len(), before + 1);
    assert_eq!(gateway.count(|c| matches!(c, Call::Query { .. })), 0);
}

#[tokio::test]
async fn query_failure_is_surfaced_and_chat_continues() {
    let gateway = RecordingGateway::new(true);
    gateway.fail_queries.store(true, Ordering::SeqCst);
    let mut conv = open(&gateway).await;
    answer_all(&mut conv, &INTAKE).await;

    assert_eq!(conv.stage(), ConversationStage::FreeChat);
    let last = conv.messages().last().unwrap();
    assert!(last.is_error());
    assert!(last.text.contains("model overloaded"));

    // The user retries with an ordinary chat message.
    gateway.fail_queries.store(false, Ordering::SeqCst);
    let appended = conv.submit_answer("Can you try again?").await;
    assert_eq!(appended.len(), 2);
    assert!(!appended[1].is_error());
    assert_eq!(conv.stage(), ConversationStage::FreeChat);
}

#[tokio::test]
async fn profile_failure_skips_plan_query() {
    let gateway = RecordingGateway::new(true);
    gateway.fail_profile.store(true, Ordering::SeqCst);
    let mut conv = open(&gateway).await;
    answer_all(&mut conv, &INTAKE).await;

    assert_eq!(conv.stage(), ConversationStage::FreeChat);
    let last = conv.messages().last().unwrap();
    assert!(last.is_error());
    assert!(last.text.contains("Invalid profile"));
    assert_eq!(gateway.count(|c| matches!(c, Call::Query { .. })), 0);
}

#[tokio::test]
async fn free_chat_forwards_with_selected_mode() {
    let gateway = RecordingGateway::new(true);
    let mut conv = open(&gateway).await;
    answer_all(&mut conv, &INTAKE).await;
    conv.set_chat_mode(ChatMode::QuickTip);

    conv.submit_answer("  quick stretch?  ").await;
    let last_query = gateway.calls().pop().unwrap();
    assert_eq!(
        last_query,
        Call::Query {
            text: "  quick stretch?  ".into(),
            user_id: conv.user_id().to_string(),
            mode: ChatMode::QuickTip,
        }
    );
}
