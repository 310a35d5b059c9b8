//! Conversation stages: which question the user is currently answering.

use serde::{Deserialize, Serialize};

/// The stages of a coaching conversation.
///
/// Intake runs CollectName → … → CollectGoals → Confirm, with a detour
/// through CollectCustomSport when the user picks "Other Sport". Confirm
/// either hands off to Generating → FreeChat or loops back to CollectName.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    #[default]
    Greeting,
    CollectName,
    CollectAge,
    CollectGender,
    CollectHeight,
    CollectWeight,
    CollectHealth,
    CollectSport,
    CollectCustomSport,
    CollectExperience,
    CollectDuration,
    CollectGoals,
    Confirm,
    Generating,
    FreeChat,
}

impl ConversationStage {
    /// Check if a transition from `self` to `target` is allowed.
    ///
    /// Staying in place is always allowed (re-prompts, goal selection).
    pub fn can_transition_to(&self, target: ConversationStage) -> bool {
        use ConversationStage::*;
        *self == target
            || matches!(
                (self, target),
                (Greeting, CollectName)
                    | (CollectName, CollectAge)
                    | (CollectAge, CollectGender)
                    | (CollectGender, CollectHeight)
                    | (CollectHeight, CollectWeight)
                    | (CollectWeight, CollectHealth)
                    | (CollectHealth, CollectSport)
                    | (CollectSport, CollectExperience)
                    | (CollectSport, CollectCustomSport)
                    | (CollectCustomSport, CollectExperience)
                    | (CollectExperience, CollectDuration)
                    | (CollectDuration, CollectGoals)
                    | (CollectGoals, Confirm)
                    | (Confirm, Generating)
                    | (Confirm, CollectName)
                    | (Generating, FreeChat)
            )
    }

    /// Whether the profile is still being collected.
    pub fn is_intake(&self) -> bool {
        !matches!(self, Self::Greeting | Self::Generating | Self::FreeChat)
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::CollectName => "collect_name",
            Self::CollectAge => "collect_age",
            Self::CollectGender => "collect_gender",
            Self::CollectHeight => "collect_height",
            Self::CollectWeight => "collect_weight",
            Self::CollectHealth => "collect_health",
            Self::CollectSport => "collect_sport",
            Self::CollectCustomSport => "collect_custom_sport",
            Self::CollectExperience => "collect_experience",
            Self::CollectDuration => "collect_duration",
            Self::CollectGoals => "collect_goals",
            Self::Confirm => "confirm",
            Self::Generating => "generating",
            Self::FreeChat => "free_chat",
        };
        write!(f, "{s}")
    }
}
