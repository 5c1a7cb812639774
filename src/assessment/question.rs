use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuestionType {
    Mcq,
    Coding,
    Scenario,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Mcq,
        QuestionType::Coding,
        QuestionType::Scenario,
    ];
}

impl FromStr for QuestionType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mcq" => Ok(QuestionType::Mcq),
            "coding" => Ok(QuestionType::Coding),
            "scenario" => Ok(QuestionType::Scenario),
            _ => Err(StoreError::InvalidValue {
                field: "question_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Difficulty tiers, listed in selection priority order
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];
}

impl FromStr for Difficulty {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(StoreError::InvalidValue {
                field: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

/// A question assigned to a module. Only `id`, `question_type` and `difficulty`
/// matter to selection; the rest is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub module_id: String,
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub title: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    1
}

impl Question {
    /// Minimal question with empty content, mostly useful for building pools
    pub fn new(
        id: impl Into<String>,
        module_id: impl Into<String>,
        question_type: QuestionType,
        difficulty: Difficulty,
    ) -> Self {
        let id = id.into();
        Self {
            title: format!("Question {id}"),
            id,
            module_id: module_id.into(),
            question_type,
            difficulty,
            prompt: String::new(),
            options: Vec::new(),
            correct_answer: None,
            explanation: None,
            points: default_points(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_question_type_display_is_lowercase() {
        assert_eq!(QuestionType::Mcq.to_string(), "mcq");
        assert_eq!(QuestionType::Coding.to_string(), "coding");
        assert_eq!(QuestionType::Scenario.to_string(), "scenario");
        assert_eq!(Difficulty::Intermediate.to_string(), "intermediate");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("  MCQ ".parse::<QuestionType>().unwrap(), QuestionType::Mcq);
        assert_eq!(
            "Advanced".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_matches!(
            "essay".parse::<QuestionType>(),
            Err(StoreError::InvalidValue { field: "question_type", .. })
        );
        assert_matches!(
            "expert".parse::<Difficulty>(),
            Err(StoreError::InvalidValue { field: "difficulty", .. })
        );
    }

    #[test]
    fn test_question_deserialization_defaults() {
        let json = r#"
        {
            "id": "q1",
            "module_id": "rust",
            "question_type": "coding",
            "difficulty": "beginner",
            "title": "Reverse a string"
        }
        "#;
        let q: Question = serde_json::from_str(json).unwrap();

        assert_eq!(q.question_type, QuestionType::Coding);
        assert_eq!(q.difficulty, Difficulty::Beginner);
        assert!(q.options.is_empty());
        assert_eq!(q.correct_answer, None);
        assert_eq!(q.points, 1);
    }

    #[test]
    fn test_difficulty_priority_order() {
        assert!(Difficulty::Beginner < Difficulty::Intermediate);
        assert!(Difficulty::Intermediate < Difficulty::Advanced);
        assert_eq!(Difficulty::ALL[0], Difficulty::Beginner);
    }
}
