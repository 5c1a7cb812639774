// Library surface for the CLI and integration tests.
pub mod assessment;
pub mod bank;
pub mod config;
pub mod error;
pub mod shuffle;
pub mod store;

pub use assessment::{AssessmentGenerator, GeneratedAssessment};
pub use error::{GenerationError, Shortfall, StoreError};
