use super::configuration::ModuleConfiguration;
use super::question::{Difficulty, Question, QuestionType};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DifficultyBreakdown {
    pub beginner: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl DifficultyBreakdown {
    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Beginner => self.beginner,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }
}

/// Summary of what was actually selected, not of what was requested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentMetadata {
    pub total_questions: usize,
    pub mcq_count: usize,
    pub coding_count: usize,
    pub scenario_count: usize,
    pub difficulty_breakdown: DifficultyBreakdown,
    pub estimated_time_minutes: u32,
    pub total_points: u32,
    pub generated_at: DateTime<Utc>,
}

impl AssessmentMetadata {
    pub fn compute(questions: &[Question], config: &ModuleConfiguration) -> Self {
        let by_type = questions.iter().counts_by(|q| q.question_type);
        let by_difficulty = questions.iter().counts_by(|q| q.difficulty);
        let type_count = |t: QuestionType| by_type.get(&t).copied().unwrap_or(0);
        let difficulty_count = |d: Difficulty| by_difficulty.get(&d).copied().unwrap_or(0);

        Self {
            total_questions: questions.len(),
            mcq_count: type_count(QuestionType::Mcq),
            coding_count: type_count(QuestionType::Coding),
            scenario_count: type_count(QuestionType::Scenario),
            difficulty_breakdown: DifficultyBreakdown {
                beginner: difficulty_count(Difficulty::Beginner),
                intermediate: difficulty_count(Difficulty::Intermediate),
                advanced: difficulty_count(Difficulty::Advanced),
            },
            estimated_time_minutes: config.total_time_minutes,
            total_points: questions
                .iter()
                .fold(0u32, |acc, q| acc.saturating_add(q.points)),
            generated_at: Utc::now(),
        }
    }

    pub fn count_for(&self, question_type: QuestionType) -> usize {
        match question_type {
            QuestionType::Mcq => self.mcq_count,
            QuestionType::Coding => self.coding_count,
            QuestionType::Scenario => self.scenario_count,
        }
    }
}
