//! Bot prompts for each intake stage.

use crate::conversation::{Message, MessageOptions};

use super::catalog::{DONE_LABEL, Gender, Goal, SportChoice};
use super::model::AthleteProfile;
use super::state::ConversationStage;

/// Button label that accepts the profile and starts plan generation.
pub const CONFIRM_LABEL: &str = "Yes, Generate Plan!";

/// Button label that discards the profile and restarts intake.
pub const EDIT_LABEL: &str = "Edit Profile";

pub const GREETING: &str = "Hey Champ! 💪 I'm Coach Carter, your AI training coach. \
Answer a few quick questions and I'll build a plan around you.";

pub const OFFLINE_NOTICE: &str = "I can't reach the coaching server right now, so I can't send \
that. Your answers are kept for this session; try again once the server is back.";

pub const PLAN_OFFLINE_NOTICE: &str = "Your profile is complete, but I can't reach the coaching \
server to build your plan right now. Once it's back, just ask me for your plan here.";

/// The question asked on entering `stage`, with its choices attached.
///
/// `chosen` is only used for the goal question, whose choices shrink as
/// goals are picked. Stages without a question return `None`.
pub fn stage_prompt(stage: ConversationStage, chosen: &[Goal]) -> Option<Message> {
    let message = match stage {
        ConversationStage::CollectName => Message::bot("What's your name?"),
        ConversationStage::CollectAge => Message::bot("How old are you? (10–100)"),
        ConversationStage::CollectGender => Message::bot("What's your gender?")
            .with_options(MessageOptions::buttons(Gender::ALL.iter().map(|g| g.label()))),
        ConversationStage::CollectHeight => Message::bot("How tall are you, in cm? (100–250)"),
        ConversationStage::CollectWeight => Message::bot("What do you weigh, in kg? (30–300)"),
        ConversationStage::CollectHealth => Message::bot(
            "Any injuries or health issues I should plan around? \
             List them separated by commas, or type \"none\".",
        )
        .with_options(MessageOptions::buttons(["None"])),
        ConversationStage::CollectSport => Message::bot("Which sport do you train for?")
            .with_options(MessageOptions::buttons(SportChoice::labels())),
        ConversationStage::CollectCustomSport => Message::bot("Which sport? Type its name."),
        ConversationStage::CollectExperience => {
            Message::bot("How many years have you been playing? (0–60)")
        }
        ConversationStage::CollectDuration => {
            Message::bot("How many weeks should the program run? (1–52)")
        }
        ConversationStage::CollectGoals => goals_prompt(chosen),
        ConversationStage::Greeting
        | ConversationStage::Confirm
        | ConversationStage::Generating
        | ConversationStage::FreeChat => return None,
    };
    Some(message)
}

/// The goal question. Already-chosen goals are left out of the choices, and
/// "Done" is offered once at least one goal is picked.
pub fn goals_prompt(chosen: &[Goal]) -> Message {
    let mut choices: Vec<String> = Goal::ALL
        .iter()
        .filter(|g| !chosen.contains(g))
        .map(|g| g.label().to_string())
        .collect();

    let text = if chosen.is_empty() {
        "What are your training goals? Pick one at a time.".to_string()
    } else {
        choices.push(DONE_LABEL.to_string());
        let labels: Vec<&str> = chosen.iter().map(|g| g.label()).collect();
        format!(
            "Got it: {}. Pick another goal, or choose Done.",
            labels.join(", ")
        )
    };
    Message::bot(text).with_options(MessageOptions::buttons(choices))
}

/// The confirmation message: profile summary plus accept/edit buttons.
pub fn confirm_prompt(profile: &AthleteProfile) -> Message {
    Message::bot(format!(
        "Here's your profile:\n{}\n\nReady for your plan?",
        profile.summary()
    ))
    .with_options(MessageOptions::buttons([CONFIRM_LABEL, EDIT_LABEL]))
}

/// The greeting shown when a conversation opens.
pub fn greeting() -> Message {
    Message::bot(GREETING)
}

pub fn generating_notice(name: &str) -> Message {
    Message::bot(format!(
        "Thanks {name}! Building your personalized plan now. This can take a minute..."
    ))
}

pub fn offline_notice() -> Message {
    Message::bot(OFFLINE_NOTICE)
}

pub fn plan_offline_notice() -> Message {
    Message::bot(PLAN_OFFLINE_NOTICE)
}
