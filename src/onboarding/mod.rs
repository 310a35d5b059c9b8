//! Onboarding: the guided intake that builds an athlete profile.
//!
//! The conversation walks through fixed stages, validating each answer and
//! filling a `ProfileDraft`. Once the user confirms, the draft is frozen
//! into an `AthleteProfile` and handed to the backend for plan generation.

pub mod catalog;
pub mod model;
pub mod prompts;
pub mod state;
pub mod transition;

pub use catalog::{Gender, Goal, Sport, SportChoice};
pub use model::{AthleteProfile, ProfileDraft};
pub use state::ConversationStage;
pub use transition::{Effect, Outcome, Transition, transition};
