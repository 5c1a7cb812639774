pub mod configuration;
pub mod distribution;
pub mod generator;
pub mod metadata;
pub mod preview;
pub mod question;
pub mod selector;

// Re-export the main types for convenience
pub use configuration::ModuleConfiguration;
pub use distribution::{DifficultyDistribution, TierCounts};
pub use generator::{AssessmentGenerator, AvailabilityReport, GeneratedAssessment, TypeAvailability};
pub use metadata::{AssessmentMetadata, DifficultyBreakdown};
pub use preview::{render_availability, render_preview};
pub use question::{Difficulty, Question, QuestionType};
pub use selector::{QuestionSelector, StratifiedSelector, UniformSelector};
