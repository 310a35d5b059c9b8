//! Athlete profile data models.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::catalog::{Gender, Goal};

/// Profile under construction. Every field starts empty and is filled by
/// exactly one intake stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    /// `Some(vec![])` means the user declared no injuries.
    pub injuries: Option<Vec<String>>,
    pub sport: Option<String>,
    pub experience_years: Option<u32>,
    pub duration_weeks: Option<u32>,
    /// Selection order is preserved; never contains duplicates.
    pub goals: Vec<Goal>,
}

impl ProfileDraft {
    /// Whether nothing has been answered yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Freeze the draft into a complete profile.
    ///
    /// Fails on the first missing field, in question order.
    pub fn finalize(&self, sessions_per_week: u32) -> Result<AthleteProfile, ValidationError> {
        let name = self.name.clone().ok_or(ValidationError::Incomplete("name"))?;
        let age = self.age.ok_or(ValidationError::Incomplete("age"))?;
        let gender = self.gender.ok_or(ValidationError::Incomplete("gender"))?;
        let height_cm = self.height_cm.ok_or(ValidationError::Incomplete("height"))?;
        let weight_kg = self.weight_kg.ok_or(ValidationError::Incomplete("weight"))?;
        let injuries = self
            .injuries
            .clone()
            .ok_or(ValidationError::Incomplete("health information"))?;
        let sport = self.sport.clone().ok_or(ValidationError::Incomplete("sport"))?;
        let experience_years = self
            .experience_years
            .ok_or(ValidationError::Incomplete("experience"))?;
        let duration_weeks = self
            .duration_weeks
            .ok_or(ValidationError::Incomplete("program duration"))?;
        if self.goals.is_empty() {
            return Err(ValidationError::NoGoalsSelected);
        }

        Ok(AthleteProfile {
            name,
            age,
            gender,
            height_cm,
            weight_kg,
            injuries,
            sport,
            experience_years,
            duration_weeks,
            goals: self.goals.iter().map(|g| g.key().to_string()).collect(),
            sessions_per_week,
        })
    }

    /// Bullet list of the answers given so far.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(format!("• Name: {name}"));
        }
        if let Some(age) = self.age {
            parts.push(format!("• Age: {age}"));
        }
        if let Some(gender) = self.gender {
            parts.push(format!("• Gender: {gender}"));
        }
        if let Some(height) = self.height_cm {
            parts.push(format!("• Height: {height} cm"));
        }
        if let Some(weight) = self.weight_kg {
            parts.push(format!("• Weight: {weight} kg"));
        }
        if let Some(injuries) = &self.injuries {
            parts.push(format!("• Health: {}", describe_injuries(injuries)));
        }
        if let Some(sport) = &self.sport {
            parts.push(format!("• Sport: {}", humanize_key(sport)));
        }
        if let Some(years) = self.experience_years {
            parts.push(format!("• Experience: {years} years"));
        }
        if let Some(weeks) = self.duration_weeks {
            parts.push(format!("• Program: {weeks} weeks"));
        }
        if !self.goals.is_empty() {
            let labels: Vec<&str> = self.goals.iter().map(|g| g.label()).collect();
            parts.push(format!("• Goals: {}", labels.join(", ")));
        }
        parts.join("\n")
    }
}

/// A complete athlete profile, frozen at confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub injuries: Vec<String>,
    /// Canonical catalog key, or lower-cased free text for custom sports.
    pub sport: String,
    pub experience_years: u32,
    pub duration_weeks: u32,
    pub goals: Vec<String>,
    pub sessions_per_week: u32,
}

impl AthleteProfile {
    /// Human-readable summary shown before the user confirms.
    pub fn summary(&self) -> String {
        let goals: Vec<&str> = self
            .goals
            .iter()
            .map(|key| Goal::from_key(key).map(|g| g.label()).unwrap_or(key.as_str()))
            .collect();

        [
            format!("• Name: {}", self.name),
            format!("• Age: {}", self.age),
            format!("• Gender: {}", self.gender),
            format!("• Height: {} cm", self.height_cm),
            format!("• Weight: {} kg", self.weight_kg),
            format!("• Health: {}", describe_injuries(&self.injuries)),
            format!("• Sport: {}", humanize_key(&self.sport)),
            format!("• Experience: {} years", self.experience_years),
            format!("• Program: {} weeks", self.duration_weeks),
            format!("• Goals: {}", goals.join(", ")),
        ]
        .join("\n")
    }

    /// The opening request sent to the coach once the profile is confirmed.
    ///
    /// Injuries are phrased as exclusions so the plan steers around them.
    pub fn plan_query(&self) -> String {
        let goals: Vec<String> = self.goals.iter().map(|g| humanize_key(g)).collect();
        let mut query = format!(
            "Create a detailed {}-week training plan for a {}-year-old {} athlete with {} years of experience, \
             training {} sessions per week. Goals: {}.",
            self.duration_weeks,
            self.age,
            humanize_key(&self.sport),
            self.experience_years,
            self.sessions_per_week,
            goals.join(", "),
        );
        if !self.injuries.is_empty() {
            query.push_str(&format!(
                " Avoid exercises that could aggravate these conditions: {}.",
                self.injuries.join(", ")
            ));
        }
        query
    }
}

/// Parse a health answer into injury tags.
///
/// `"none"` (any case) means no injuries. Otherwise comma-separated segments
/// are trimmed, empties dropped, and repeats collapsed to the first one.
pub fn parse_injuries(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    let mut injuries: Vec<String> = Vec::new();
    for segment in trimmed.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !injuries.iter().any(|existing| existing == segment) {
            injuries.push(segment.to_string());
        }
    }
    injuries
}

fn describe_injuries(injuries: &[String]) -> String {
    if injuries.is_empty() {
        "no injuries declared".to_string()
    } else {
        injuries.join(", ")
    }
}

fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ProfileDraft {
        ProfileDraft {
            name: Some("Alex".into()),
            age: Some(28),
            gender: Some(Gender::Male),
            height_cm: Some(180.0),
            weight_kg: Some(75.0),
            injuries: Some(vec![]),
            sport: Some("basketball".into()),
            experience_years: Some(5),
            duration_weeks: Some(12),
            goals: vec![Goal::Strength],
        }
    }

    #[test]
    fn default_draft_is_empty() {
        let draft = ProfileDraft::default();
        assert!(draft.is_empty());
        assert!(draft.summary().is_empty());
        assert!(!complete_draft().is_empty());
    }

    #[test]
    fn finalize_complete_draft() {
        let profile = complete_draft().finalize(5).unwrap();
        assert_eq!(profile.name, "Alex");
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.goals, vec!["strength".to_string()]);
        assert_eq!(profile.sessions_per_week, 5);
        assert!(profile.injuries.is_empty());
    }

    #[test]
    fn finalize_reports_first_missing_field() {
        let mut draft = complete_draft();
        draft.age = None;
        draft.sport = None;
        assert_eq!(draft.finalize(5), Err(ValidationError::Incomplete("age")));
    }

    #[test]
    fn finalize_requires_a_goal() {
        let mut draft = complete_draft();
        draft.goals.clear();
        assert_eq!(draft.finalize(5), Err(ValidationError::NoGoalsSelected));
    }

    #[test]
    fn none_means_no_injuries() {
        assert!(parse_injuries("none").is_empty());
        assert!(parse_injuries("  NONE ").is_empty());
    }

    #[test]
    fn injuries_are_split_trimmed_and_ordered() {
        assert_eq!(
            parse_injuries("knee pain, lower back"),
            vec!["knee pain".to_string(), "lower back".to_string()]
        );
        assert_eq!(
            parse_injuries(" ankle ,, ankle , shoulder ,"),
            vec!["ankle".to_string(), "shoulder".to_string()]
        );
    }

    #[test]
    fn profile_serializes_with_backend_field_names() {
        let profile = complete_draft().finalize(5).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["height_cm"], 180.0);
        assert_eq!(json["gender"], "male");
        assert_eq!(json["experience_years"], 5);
        assert_eq!(json["duration_weeks"], 12);
        assert_eq!(json["goals"][0], "strength");
    }

    #[test]
    fn summary_includes_every_field() {
        let summary = complete_draft().finalize(5).unwrap().summary();
        assert!(summary.contains("Alex"));
        assert!(summary.contains("180 cm"));
        assert!(summary.contains("75 kg"));
        assert!(summary.contains("no injuries declared"));
        assert!(summary.contains("basketball"));
        assert!(summary.contains("5 years"));
        assert!(summary.contains("12 weeks"));
        assert!(summary.contains("Strength"));
    }

    #[test]
    fn plan_query_embeds_profile() {
        let mut draft = complete_draft();
        draft.goals.push(Goal::MuscleGain);
        let query = draft.finalize(5).unwrap().plan_query();
        assert!(query.contains("12-week"));
        assert!(query.contains("28-year-old basketball athlete"));
        assert!(query.contains("5 years of experience"));
        assert!(query.contains("strength, muscle gain"));
        assert!(!query.contains("Avoid"));
    }

    #[test]
    fn plan_query_excludes_injuries() {
        let mut draft = complete_draft();
        draft.injuries = Some(vec!["knee pain".into(), "lower back".into()]);
        let query = draft.finalize(5).unwrap().plan_query();
        assert!(query.contains("Avoid exercises that could aggravate these conditions: knee pain, lower back."));
    }
}
