use super::distribution::DifficultyDistribution;
use super::question::QuestionType;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// Administrator-defined targets for generating an assessment from one module's pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    pub module_id: String,
    #[serde(default)]
    pub mcq_count: usize,
    #[serde(default)]
    pub coding_count: usize,
    #[serde(default)]
    pub scenario_count: usize,
    pub total_time_minutes: u32,
    #[serde(default)]
    pub difficulty_distribution: DifficultyDistribution,
}

impl ModuleConfiguration {
    pub fn new(module_id: impl Into<String>, total_time_minutes: u32) -> Self {
        Self {
            module_id: module_id.into(),
            mcq_count: 0,
            coding_count: 0,
            scenario_count: 0,
            total_time_minutes,
            difficulty_distribution: DifficultyDistribution::default(),
        }
    }

    pub fn with_counts(mut self, mcq: usize, coding: usize, scenario: usize) -> Self {
        self.mcq_count = mcq;
        self.coding_count = coding;
        self.scenario_count = scenario;
        self
    }

    pub fn with_distribution(mut self, distribution: DifficultyDistribution) -> Self {
        self.difficulty_distribution = distribution;
        self
    }

    pub fn target_for(&self, question_type: QuestionType) -> usize {
        match question_type {
            QuestionType::Mcq => self.mcq_count,
            QuestionType::Coding => self.coding_count,
            QuestionType::Scenario => self.scenario_count,
        }
    }

    pub fn total_requested(&self) -> usize {
        self.mcq_count + self.coding_count + self.scenario_count
    }

    /// Checked by stores before persisting; generation itself trusts the record.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.module_id.trim().is_empty() {
            return Err(StoreError::InvalidValue {
                field: "module_id",
                value: self.module_id.clone(),
            });
        }
        if self.total_time_minutes == 0 {
            return Err(StoreError::InvalidValue {
                field: "total_time_minutes",
                value: self.total_time_minutes.to_string(),
            });
        }
        Ok(())
    }
}
