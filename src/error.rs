use crate::assessment::QuestionType;
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// One question type the pool cannot satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub question_type: QuestionType,
    pub required: usize,
    pub available: usize,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requires {} but only {} available",
            self.question_type, self.required, self.available
        )
    }
}

/// Failures of the backing configuration/question stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Terminal failures of assessment generation. No partial assessment accompanies any of them.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("no assessment configuration exists for module '{module_id}'")]
    ConfigurationMissing { module_id: String },
    #[error("no questions are assigned to module '{module_id}'")]
    NoQuestionsAvailable { module_id: String },
    #[error(
        "insufficient questions for module '{module_id}': {}",
        join_shortfalls(.shortfalls)
    )]
    InsufficientQuestions {
        module_id: String,
        shortfalls: Vec<Shortfall>,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn join_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls.iter().join("; ")
}
