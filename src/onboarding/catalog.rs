//! Closed catalogs offered during intake: sports, goals and genders.
//!
//! Each entry has a display label (what the buttons show) and a canonical
//! key (what the backend receives). Matching goes through these tables only,
//! never through substring search.

use serde::{Deserialize, Serialize};

/// Label of the escape option that leads to free-text sport entry.
pub const OTHER_SPORT_LABEL: &str = "➕ Other Sport";

/// Label of the choice that finishes goal selection.
pub const DONE_LABEL: &str = "✅ Done";

/// Lower-case and replace spaces with underscores.
///
/// Used to compare typed input against canonical keys.
pub fn normalize_token(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// A supported sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Basketball,
    Football,
    AmericanFootball,
    Tennis,
    Running,
    Swimming,
    Cycling,
    Volleyball,
    Baseball,
    Boxing,
    MartialArts,
    Weightlifting,
    Crossfit,
    Cricket,
    Rugby,
    Hockey,
    Golf,
}

impl Sport {
    /// Every sport in the order the buttons are offered.
    pub const ALL: [Sport; 17] = [
        Sport::Basketball,
        Sport::Football,
        Sport::AmericanFootball,
        Sport::Tennis,
        Sport::Running,
        Sport::Swimming,
        Sport::Cycling,
        Sport::Volleyball,
        Sport::Baseball,
        Sport::Boxing,
        Sport::MartialArts,
        Sport::Weightlifting,
        Sport::Crossfit,
        Sport::Cricket,
        Sport::Rugby,
        Sport::Hockey,
        Sport::Golf,
    ];

    /// Canonical key sent to the backend.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Basketball => "basketball",
            Self::Football => "football",
            Self::AmericanFootball => "american_football",
            Self::Tennis => "tennis",
            Self::Running => "running",
            Self::Swimming => "swimming",
            Self::Cycling => "cycling",
            Self::Volleyball => "volleyball",
            Self::Baseball => "baseball",
            Self::Boxing => "boxing",
            Self::MartialArts => "martial_arts",
            Self::Weightlifting => "weightlifting",
            Self::Crossfit => "crossfit",
            Self::Cricket => "cricket",
            Self::Rugby => "rugby",
            Self::Hockey => "hockey",
            Self::Golf => "golf",
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Basketball => "🏀 Basketball",
            Self::Football => "⚽ Football",
            Self::AmericanFootball => "🏈 American Football",
            Self::Tennis => "🎾 Tennis",
            Self::Running => "🏃 Running",
            Self::Swimming => "🏊 Swimming",
            Self::Cycling => "🚴 Cycling",
            Self::Volleyball => "🏐 Volleyball",
            Self::Baseball => "⚾ Baseball",
            Self::Boxing => "🥊 Boxing",
            Self::MartialArts => "🥋 Martial Arts",
            Self::Weightlifting => "🏋️ Weightlifting",
            Self::Crossfit => "💪 CrossFit",
            Self::Cricket => "🏏 Cricket",
            Self::Rugby => "🏉 Rugby",
            Self::Hockey => "🏒 Hockey",
            Self::Golf => "⛳ Golf",
        }
    }

    pub fn from_key(key: &str) -> Option<Sport> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Outcome of matching an answer against the sport catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SportChoice {
    Catalog(Sport),
    Other,
}

impl SportChoice {
    /// Resolve typed or clicked input.
    ///
    /// The full display label is checked first, then the canonical key
    /// (case-insensitive, spaces read as underscores). Anything else is `None`.
    pub fn resolve(input: &str) -> Option<SportChoice> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.eq_ignore_ascii_case(OTHER_SPORT_LABEL) {
            return Some(SportChoice::Other);
        }
        if let Some(sport) = Sport::ALL
            .into_iter()
            .find(|s| trimmed.to_lowercase() == s.label().to_lowercase())
        {
            return Some(SportChoice::Catalog(sport));
        }

        let token = normalize_token(trimmed);
        if token == "other" || token == "other_sport" {
            return Some(SportChoice::Other);
        }
        Sport::from_key(&token).map(SportChoice::Catalog)
    }

    /// All button labels for the sport question, escape option last.
    pub fn labels() -> Vec<String> {
        Sport::ALL
            .iter()
            .map(|s| s.label().to_string())
            .chain(std::iter::once(OTHER_SPORT_LABEL.to_string()))
            .collect()
    }
}

/// A training goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Strength,
    Speed,
    Endurance,
    Agility,
    Power,
    Flexibility,
    MuscleGain,
    FatLoss,
    InjuryPrevention,
    Recovery,
}

impl Goal {
    pub const ALL: [Goal; 10] = [
        Goal::Strength,
        Goal::Speed,
        Goal::Endurance,
        Goal::Agility,
        Goal::Power,
        Goal::Flexibility,
        Goal::MuscleGain,
        Goal::FatLoss,
        Goal::InjuryPrevention,
        Goal::Recovery,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Speed => "speed",
            Self::Endurance => "endurance",
            Self::Agility => "agility",
            Self::Power => "power",
            Self::Flexibility => "flexibility",
            Self::MuscleGain => "muscle_gain",
            Self::FatLoss => "fat_loss",
            Self::InjuryPrevention => "injury_prevention",
            Self::Recovery => "recovery",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Speed => "Speed",
            Self::Endurance => "Endurance",
            Self::Agility => "Agility",
            Self::Power => "Power",
            Self::Flexibility => "Flexibility",
            Self::MuscleGain => "Muscle Gain",
            Self::FatLoss => "Fat Loss",
            Self::InjuryPrevention => "Injury Prevention",
            Self::Recovery => "Recovery",
        }
    }

    pub fn from_key(key: &str) -> Option<Goal> {
        Self::ALL.into_iter().find(|g| g.key() == key)
    }

    /// Match a label or key after normalization ("Muscle Gain" → `muscle_gain`).
    pub fn resolve(input: &str) -> Option<Goal> {
        Self::from_key(&normalize_token(input))
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Whether `input` is the goal-selection terminator.
pub fn is_done_choice(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.eq_ignore_ascii_case(DONE_LABEL) || normalize_token(trimmed) == "done"
}

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive match on the three fixed values.
    pub fn parse(input: &str) -> Option<Gender> {
        match input.trim().to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}
