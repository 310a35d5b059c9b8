//! The intake transition function.
//!
//! `transition` is pure: given the current stage, the draft profile and one
//! raw input, it returns the next stage, the next draft, the messages to log
//! and at most one side effect. Network calls happen in the controller.

use crate::conversation::{Message, MessageOptions};
use crate::error::ValidationError;

use super::catalog::{Gender, Goal, SportChoice, is_done_choice, normalize_token};
use super::model::{AthleteProfile, ProfileDraft, parse_injuries};
use super::prompts::{
    CONFIRM_LABEL, EDIT_LABEL, confirm_prompt, generating_notice, goals_prompt, greeting,
    stage_prompt,
};
use super::state::ConversationStage;

/// A side effect the controller must run after applying a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Submit the frozen profile, then request the opening plan.
    GeneratePlan(AthleteProfile),
    /// Forward a free-chat query verbatim.
    SendQuery(String),
}

/// How the input was treated.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted,
    /// Re-prompted; stage and draft are unchanged.
    Rejected(ValidationError),
    /// Nothing happens at all.
    Ignored,
}

/// Result of feeding one input to the state machine.
#[derive(Debug, Clone)]
pub struct Transition {
    pub next_stage: ConversationStage,
    pub draft: ProfileDraft,
    pub messages: Vec<Message>,
    pub effect: Option<Effect>,
    pub outcome: Outcome,
}

impl Transition {
    fn ignored(stage: ConversationStage, draft: &ProfileDraft) -> Self {
        Self {
            next_stage: stage,
            draft: draft.clone(),
            messages: Vec::new(),
            effect: None,
            outcome: Outcome::Ignored,
        }
    }

    fn rejected(stage: ConversationStage, draft: &ProfileDraft, error: ValidationError) -> Self {
        Self {
            next_stage: stage,
            draft: draft.clone(),
            messages: vec![reprompt(stage, draft, &error)],
            effect: None,
            outcome: Outcome::Rejected(error),
        }
    }
}

/// What an accepted answer produces, before the user's message is prepended.
struct Step {
    next: ConversationStage,
    draft: ProfileDraft,
    replies: Vec<Message>,
    effect: Option<Effect>,
}

impl Step {
    /// Advance to `next` and ask its question.
    fn ask(next: ConversationStage, draft: ProfileDraft) -> Self {
        let replies = stage_prompt(next, &draft.goals).into_iter().collect();
        Self {
            next,
            draft,
            replies,
            effect: None,
        }
    }
}

/// Feed one raw input to the conversation state machine.
///
/// Accepted inputs log the raw user text followed by the bot's next prompt.
/// Rejected inputs log only a bot re-prompt and leave stage and draft as
/// they were.
pub fn transition(
    stage: ConversationStage,
    draft: &ProfileDraft,
    input: &str,
    sessions_per_week: u32,
) -> Transition {
    let trimmed = input.trim();

    match stage {
        ConversationStage::Generating => Transition::ignored(stage, draft),
        ConversationStage::FreeChat => {
            if trimmed.is_empty() {
                return Transition::ignored(stage, draft);
            }
            Transition {
                next_stage: stage,
                draft: draft.clone(),
                messages: vec![Message::user(input)],
                effect: Some(Effect::SendQuery(input.to_string())),
                outcome: Outcome::Accepted,
            }
        }
        ConversationStage::Greeting => {
            let mut messages = vec![Message::user(input), greeting()];
            messages.extend(stage_prompt(ConversationStage::CollectName, &[]));
            Transition {
                next_stage: ConversationStage::CollectName,
                draft: draft.clone(),
                messages,
                effect: None,
                outcome: Outcome::Accepted,
            }
        }
        _ => {
            debug_assert!(stage.is_intake());
            if trimmed.is_empty() {
                return Transition::rejected(stage, draft, ValidationError::Empty);
            }
            match answer(stage, draft, trimmed, sessions_per_week) {
                Ok(step) => {
                    debug_assert!(
                        stage.can_transition_to(step.next),
                        "illegal transition {stage} -> {}",
                        step.next
                    );
                    let mut messages = Vec::with_capacity(step.replies.len() + 1);
                    messages.push(Message::user(input));
                    messages.extend(step.replies);
                    Transition {
                        next_stage: step.next,
                        draft: step.draft,
                        messages,
                        effect: step.effect,
                        outcome: Outcome::Accepted,
                    }
                }
                Err(error) => Transition::rejected(stage, draft, error),
            }
        }
    }
}

/// Validate an answer for an intake stage and build the resulting step.
fn answer(
    stage: ConversationStage,
    draft: &ProfileDraft,
    input: &str,
    sessions_per_week: u32,
) -> Result<Step, ValidationError> {
    use ConversationStage::*;

    let mut next = draft.clone();
    match stage {
        CollectName => {
            next.name = Some(input.to_string());
            Ok(Step::ask(CollectAge, next))
        }
        CollectAge => {
            next.age = Some(parse_int(input, "age", 10, 100)?);
            Ok(Step::ask(CollectGender, next))
        }
        CollectGender => {
            next.gender = Some(Gender::parse(input).ok_or(ValidationError::UnknownGender)?);
            Ok(Step::ask(CollectHeight, next))
        }
        CollectHeight => {
            next.height_cm = Some(parse_float(input, "height", 100.0, 250.0)?);
            Ok(Step::ask(CollectWeight, next))
        }
        CollectWeight => {
            next.weight_kg = Some(parse_float(input, "weight", 30.0, 300.0)?);
            Ok(Step::ask(CollectHealth, next))
        }
        CollectHealth => {
            next.injuries = Some(parse_injuries(input));
            Ok(Step::ask(CollectSport, next))
        }
        CollectSport => match SportChoice::resolve(input) {
            Some(SportChoice::Catalog(sport)) => {
                next.sport = Some(sport.key().to_string());
                Ok(Step::ask(CollectExperience, next))
            }
            Some(SportChoice::Other) => Ok(Step::ask(CollectCustomSport, next)),
            None => Err(ValidationError::UnknownSport(input.to_string())),
        },
        CollectCustomSport => {
            next.sport = Some(input.to_lowercase());
            Ok(Step::ask(CollectExperience, next))
        }
        CollectExperience => {
            next.experience_years = Some(parse_int(input, "experience", 0, 60)?);
            Ok(Step::ask(CollectDuration, next))
        }
        CollectDuration => {
            next.duration_weeks = Some(parse_int(input, "program duration", 1, 52)?);
            Ok(Step::ask(CollectGoals, next))
        }
        CollectGoals => {
            if is_done_choice(input) {
                if next.goals.is_empty() {
                    return Err(ValidationError::NoGoalsSelected);
                }
                let profile = next.finalize(sessions_per_week)?;
                return Ok(Step {
                    next: Confirm,
                    draft: next,
                    replies: vec![confirm_prompt(&profile)],
                    effect: None,
                });
            }
            let goal = Goal::resolve(input)
                .ok_or_else(|| ValidationError::UnknownGoal(input.to_string()))?;
            if !next.goals.contains(&goal) {
                next.goals.push(goal);
            }
            Ok(Step {
                next: CollectGoals,
                replies: vec![goals_prompt(&next.goals)],
                draft: next,
                effect: None,
            })
        }
        Confirm => {
            if matches_choice(input, CONFIRM_LABEL, &["yes", "y", "generate", "confirm"]) {
                let profile = next.finalize(sessions_per_week)?;
                Ok(Step {
                    next: Generating,
                    replies: vec![generating_notice(&profile.name)],
                    draft: next,
                    effect: Some(Effect::GeneratePlan(profile)),
                })
            } else if matches_choice(input, EDIT_LABEL, &["edit", "no", "n", "restart"]) {
                let mut replies = vec![Message::bot("No problem, let's start over.")];
                replies.extend(stage_prompt(CollectName, &[]));
                Ok(Step {
                    next: CollectName,
                    draft: ProfileDraft::default(),
                    replies,
                    effect: None,
                })
            } else {
                Err(ValidationError::UnknownChoice)
            }
        }
        // Not intake stages; `transition` handles them before calling here.
        Greeting | Generating | FreeChat => Err(ValidationError::UnknownChoice),
    }
}

/// Bot message for a rejected answer: the correction, then the question again.
fn reprompt(stage: ConversationStage, draft: &ProfileDraft, error: &ValidationError) -> Message {
    if stage == ConversationStage::Confirm {
        return Message::bot(error.to_string())
            .with_options(MessageOptions::buttons([CONFIRM_LABEL, EDIT_LABEL]));
    }
    match stage_prompt(stage, &draft.goals) {
        Some(prompt) => {
            let mut message = Message::bot(format!("{error} {}", prompt.text));
            message.options = prompt.options;
            message
        }
        None => Message::bot(error.to_string()),
    }
}

fn matches_choice(input: &str, label: &str, aliases: &[&str]) -> bool {
    input.eq_ignore_ascii_case(label) || aliases.contains(&normalize_token(input).as_str())
}

fn parse_int(input: &str, field: &'static str, min: u32, max: u32) -> Result<u32, ValidationError> {
    let value: i64 = input
        .parse()
        .map_err(|_| ValidationError::NotAnInteger { field })?;
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ValidationError::OutOfRange {
            field,
            min: f64::from(min),
            max: f64::from(max),
        });
    }
    Ok(value as u32)
}

fn parse_float(input: &str, field: &'static str, min: f64, max: f64) -> Result<f64, ValidationError> {
    let value: f64 = input
        .parse()
        .map_err(|_| ValidationError::NotANumber { field })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field });
    }
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange { field, min, max });
    }
    Ok(value)
}
