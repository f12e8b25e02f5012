use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type ProgramId = u64;

/// Shared scale for program difficulty and user experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }

    pub fn rank(&self) -> i32 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Advanced => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Practical,
    Theoretical,
}

impl LearningStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Practical => "practical",
            Self::Theoretical => "theoretical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "visual" => Some(Self::Visual),
            "practical" => Some(Self::Practical),
            "theoretical" => Some(Self::Theoretical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementEntry {
    pub program_id: ProgramId,
    pub engagement_score: f64,
    pub last_interaction: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub interests: BTreeSet<String>,
    pub learning_style: LearningStyle,
    pub experience_level: SkillLevel,
    #[serde(default)]
    pub engagement_history: Vec<EngagementEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub joined_at: DateTime<Utc>,
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub difficulty: SkillLevel,
    pub topics: BTreeSet<String>,
    #[serde(default)]
    pub required_skills: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: u64,
    pub program_id: ProgramId,
    pub user_id: UserId,
    pub enrolled_at: DateTime<Utc>,
    pub progress: f64,
    pub completed_tasks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Click,
    Enroll,
    Complete,
    Other,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Click => "click",
            Self::Enroll => "enroll",
            Self::Complete => "complete",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "view" => Self::View,
            "click" => Self::Click,
            "enroll" => Self::Enroll,
            "complete" => Self::Complete,
            _ => Self::Other,
        }
    }

    pub fn weight(&self) -> u32 {
        match self {
            Self::View => 1,
            Self::Click => 2,
            Self::Enroll => 5,
            Self::Complete => 10,
            Self::Other => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub kind: InteractionKind,
    pub timestamp: DateTime<Utc>,
    pub weight: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_weights_follow_lookup_table() {
        assert_eq!(InteractionKind::parse("view").weight(), 1);
        assert_eq!(InteractionKind::parse("CLICK").weight(), 2);
        assert_eq!(InteractionKind::parse("enroll").weight(), 5);
        assert_eq!(InteractionKind::parse("complete").weight(), 10);
        assert_eq!(InteractionKind::parse("share"), InteractionKind::Other);
        assert_eq!(InteractionKind::parse("share").weight(), 1);
    }

    #[test]
    fn skill_level_ranks() {
        assert_eq!(SkillLevel::Beginner.rank(), 0);
        assert_eq!(SkillLevel::parse("Intermediate").rank(), 1);
        assert_eq!(SkillLevel::parse("advanced").rank(), 2);
    }

    #[test]
    fn learning_style_parse_is_case_insensitive() {
        assert_eq!(LearningStyle::parse("Visual"), Some(LearningStyle::Visual));
        assert_eq!(
            LearningStyle::parse("THEORETICAL"),
            Some(LearningStyle::Theoretical)
        );
        assert_eq!(LearningStyle::parse("kinesthetic"), None);
        for style in [LearningStyle::Visual, LearningStyle::Practical, LearningStyle::Theoretical] {
            assert_eq!(LearningStyle::parse(style.as_str()), Some(style));
        }
    }

    #[test]
    fn user_serializes_camel_case() {
        let user = User {
            id: 7,
            name: "Asha".to_string(),
            joined_at: DateTime::from_timestamp_millis(0).unwrap_or_default(),
            preferences: UserPreferences {
                interests: ["AI".to_string()].into_iter().collect(),
                learning_style: LearningStyle::Practical,
                experience_level: SkillLevel::Intermediate,
                engagement_history: Vec::new(),
            },
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["preferences"]["learningStyle"], "practical");
        assert_eq!(json["preferences"]["experienceLevel"], "intermediate");
        assert!(json.get("joinedAt").is_some());
    }
}
