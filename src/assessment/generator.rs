use super::configuration::ModuleConfiguration;
use super::metadata::AssessmentMetadata;
use super::question::{Question, QuestionType};
use super::selector::{QuestionSelector, StratifiedSelector};
use crate::error::{GenerationError, Shortfall};
use crate::shuffle::shuffled;
use crate::store::{ConfigurationStore, QuestionStore};
use log::{debug, info};
use rand::RngCore;
use serde::Serialize;

/// A freshly sampled assessment, ready for preview and the exam runner
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAssessment {
    pub questions: Vec<Question>,
    pub config: ModuleConfiguration,
    pub metadata: AssessmentMetadata,
}

/// Required vs. available counts for one question type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeAvailability {
    pub question_type: QuestionType,
    pub required: usize,
    pub available: usize,
}

impl TypeAvailability {
    pub fn is_sufficient(&self) -> bool {
        self.available >= self.required
    }
}

/// Whether a module can currently produce an assessment, without sampling one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    pub module_id: String,
    pub pool_size: usize,
    pub types: Vec<TypeAvailability>,
}

impl AvailabilityReport {
    fn build(config: &ModuleConfiguration, pool: &[Question]) -> Self {
        let types = QuestionType::ALL
            .iter()
            .map(|&question_type| TypeAvailability {
                question_type,
                required: config.target_for(question_type),
                available: pool
                    .iter()
                    .filter(|q| q.question_type == question_type)
                    .count(),
            })
            .collect();

        Self {
            module_id: config.module_id.clone(),
            pool_size: pool.len(),
            types,
        }
    }

    /// Every short type, in `QuestionType::ALL` order
    pub fn shortfalls(&self) -> Vec<Shortfall> {
        self.types
            .iter()
            .filter(|t| !t.is_sufficient())
            .map(|t| Shortfall {
                question_type: t.question_type,
                required: t.required,
                available: t.available,
            })
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        self.pool_size > 0 && self.types.iter().all(TypeAvailability::is_sufficient)
    }
}

/// Builds randomized, difficulty-proportioned assessments from a module's pool.
///
/// Holds no state between calls; concurrent `generate` calls only share the store.
pub struct AssessmentGenerator<S> {
    store: S,
}

impl<S> AssessmentGenerator<S>
where
    S: ConfigurationStore + QuestionStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate an assessment for `module_id`. Either every configured count is
    /// met exactly or the call fails; nothing partial is returned.
    pub fn generate(&self, module_id: &str) -> Result<GeneratedAssessment, GenerationError> {
        self.generate_with(module_id, &mut rand::thread_rng())
    }

    pub(crate) fn generate_with(
        &self,
        module_id: &str,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedAssessment, GenerationError> {
        let config = self.fetch_configuration(module_id)?;

        let pool = self.store.get_questions(module_id)?;
        if pool.is_empty() {
            return Err(GenerationError::NoQuestionsAvailable {
                module_id: module_id.to_string(),
            });
        }

        let shortfalls = AvailabilityReport::build(&config, &pool).shortfalls();
        if !shortfalls.is_empty() {
            return Err(GenerationError::InsufficientQuestions {
                module_id: module_id.to_string(),
                shortfalls,
            });
        }

        let mut selected = Vec::with_capacity(config.total_requested());
        for question_type in QuestionType::ALL {
            let subset: Vec<Question> = pool
                .iter()
                .filter(|q| q.question_type == question_type)
                .cloned()
                .collect();
            let target = config.target_for(question_type);
            let picked =
                StratifiedSelector.select(&subset, target, &config.difficulty_distribution, rng);
            debug!(
                "{module_id}/{question_type}: selected {} of {} (target {target})",
                picked.len(),
                subset.len()
            );
            selected.extend(picked);
        }

        let questions = shuffled(selected, rng);
        let metadata = AssessmentMetadata::compute(&questions, &config);
        info!(
            "generated assessment for {module_id}: {} questions, {} minutes",
            metadata.total_questions, metadata.estimated_time_minutes
        );

        Ok(GeneratedAssessment {
            questions,
            config,
            metadata,
        })
    }

    /// Report per-type availability so callers can disable starting an assessment
    /// up front. Only a missing configuration or a store failure is an error.
    pub fn check_availability(
        &self,
        module_id: &str,
    ) -> Result<AvailabilityReport, GenerationError> {
        let config = self.fetch_configuration(module_id)?;
        let pool = self.store.get_questions(module_id)?;
        Ok(AvailabilityReport::build(&config, &pool))
    }

    fn fetch_configuration(
        &self,
        module_id: &str,
    ) -> Result<ModuleConfiguration, GenerationError> {
        self.store
            .get_configuration(module_id)?
            .ok_or_else(|| GenerationError::ConfigurationMissing {
                module_id: module_id.to_string(),
            })
    }
}
