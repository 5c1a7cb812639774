use crate::assessment::{ModuleConfiguration, Question};
use crate::error::StoreError;
use crate::store::{MemoryStore, SqliteStore};
use include_dir::{include_dir, Dir};
use log::warn;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

static BANK_DIR: Dir = include_dir!("src/banks");

/// A module's configuration and question pool as exchanged in files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleBank {
    #[serde(default)]
    pub configuration: Option<ModuleConfiguration>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl ModuleBank {
    /// Parse a JSON bank. Questions without a module adopt the configuration's module.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let mut bank: ModuleBank = serde_json::from_str(json)?;
        if let Some(module_id) = bank.configuration.as_ref().map(|c| c.module_id.clone()) {
            for q in bank.questions.iter_mut().filter(|q| q.module_id.is_empty()) {
                q.module_id = module_id.clone();
            }
        }
        Ok(bank)
    }

    /// Reassign the configuration and every question to `module_id`
    pub fn with_module(mut self, module_id: &str) -> Self {
        if let Some(config) = self.configuration.as_mut() {
            config.module_id = module_id.to_string();
        }
        for q in &mut self.questions {
            q.module_id = module_id.to_string();
        }
        self
    }

    fn check_questions(&self) -> Result<(), StoreError> {
        match self.questions.iter().find(|q| q.module_id.trim().is_empty()) {
            Some(q) => Err(StoreError::InvalidValue {
                field: "module_id",
                value: format!("question '{}' has no module", q.id),
            }),
            None => Ok(()),
        }
    }

    /// Save the configuration (when present) and all questions
    pub fn import_into(&self, store: &mut SqliteStore) -> Result<(), StoreError> {
        self.check_questions()?;
        if let Some(config) = &self.configuration {
            store.save_configuration(config)?;
        }
        store.add_questions(&self.questions)
    }

    pub fn into_memory_store(self) -> MemoryStore {
        let mut store = MemoryStore::new();
        if let Some(config) = self.configuration {
            store.put_configuration(config);
        }
        store.add_questions(self.questions);
        store
    }
}

pub fn load_bank<P: AsRef<Path>>(path: P) -> Result<ModuleBank, StoreError> {
    let text = std::fs::read_to_string(path)?;
    ModuleBank::from_json(&text)
}

#[derive(Debug, Deserialize)]
struct CsvQuestion {
    id: String,
    question_type: String,
    difficulty: String,
    title: String,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    options: Option<String>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    points: Option<u32>,
}

/// Read a question sheet with header
/// `id,question_type,difficulty,title,prompt,options,correct_answer,explanation,points`.
/// Options are `|`-separated.
pub fn read_questions_csv<R: Read>(
    reader: R,
    module_id: &str,
) -> Result<Vec<Question>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut questions = Vec::new();

    for row in rdr.deserialize::<CsvQuestion>() {
        let row = row?;
        if row.id.is_empty() {
            warn!("skipping csv row without an id: {}", row.title);
            continue;
        }
        questions.push(Question {
            id: row.id,
            module_id: module_id.to_string(),
            question_type: row.question_type.parse()?,
            difficulty: row.difficulty.parse()?,
            title: row.title,
            prompt: row.prompt.unwrap_or_default(),
            options: row
                .options
                .map(|o| {
                    o.split('|')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            correct_answer: row.correct_answer.filter(|s| !s.is_empty()),
            explanation: row.explanation.filter(|s| !s.is_empty()),
            points: row.points.unwrap_or(1),
        });
    }

    Ok(questions)
}

/// Names of the banks compiled into the binary
pub fn demo_bank_names() -> Vec<String> {
    let mut names: Vec<String> = BANK_DIR
        .files()
        .filter_map(|f| f.path().file_stem())
        .filter_map(|s| s.to_str())
        .map(String::from)
        .collect();
    names.sort();
    names
}

pub fn demo_bank(name: &str) -> Result<ModuleBank, StoreError> {
    let file = BANK_DIR
        .get_file(format!("{name}.json"))
        .ok_or_else(|| StoreError::InvalidValue {
            field: "demo bank",
            value: name.to_string(),
        })?;
    let text = file.contents_utf8().ok_or_else(|| StoreError::InvalidValue {
        field: "demo bank encoding",
        value: name.to_string(),
    })?;
    ModuleBank::from_json(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{Difficulty, QuestionType};
    use crate::store::{ConfigurationStore, QuestionStore};
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "\
id,question_type,difficulty,title,prompt,options,correct_answer,explanation,points
q1,mcq,beginner,Keywords,Which keyword?,let | mut | const,mut,,2
q2,Coding,ADVANCED,Thread pool,Build one,,,,
";

    #[test]
    fn test_read_questions_csv() {
        let questions = read_questions_csv(CSV.as_bytes(), "rust").unwrap();
        assert_eq!(questions.len(), 2);

        let q1 = &questions[0];
        assert_eq!(q1.module_id, "rust");
        assert_eq!(q1.question_type, QuestionType::Mcq);
        assert_eq!(q1.options, vec!["let", "mut", "const"]);
        assert_eq!(q1.correct_answer.as_deref(), Some("mut"));
        assert_eq!(q1.explanation, None);
        assert_eq!(q1.points, 2);

        let q2 = &questions[1];
        assert_eq!(q2.question_type, QuestionType::Coding);
        assert_eq!(q2.difficulty, Difficulty::Advanced);
        assert!(q2.options.is_empty());
        assert_eq!(q2.points, 1);
    }

    #[test]
    fn test_read_questions_csv_rejects_unknown_type() {
        let csv = "id,question_type,difficulty,title\nq1,essay,beginner,Essay\n";
        assert_matches!(
            read_questions_csv(csv.as_bytes(), "rust"),
            Err(StoreError::InvalidValue { field: "question_type", .. })
        );
    }

    #[test]
    fn test_from_json_fills_module_from_configuration() {
        let json = r#"
        {
            "configuration": {"module_id": "go", "mcq_count": 1, "total_time_minutes": 5},
            "questions": [
                {"id": "g1", "question_type": "mcq", "difficulty": "beginner", "title": "Goroutines"}
            ]
        }
        "#;
        let bank = ModuleBank::from_json(json).unwrap();
        assert_eq!(bank.questions[0].module_id, "go");
    }

    #[test]
    fn test_import_requires_module_for_every_question() {
        let bank = ModuleBank {
            configuration: None,
            questions: vec![Question::new("x", "", QuestionType::Mcq, Difficulty::Beginner)],
        };
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(bank.import_into(&mut store).is_err());
        assert!(bank.with_module("m").import_into(&mut store).is_ok());
        assert_eq!(store.get_questions("m").unwrap().len(), 1);
    }

    #[test]
    fn test_load_bank_and_import() {
        let bank = demo_bank("sql-essentials").unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&bank).unwrap().as_bytes())
            .unwrap();

        let loaded = load_bank(file.path()).unwrap();
        assert_eq!(loaded, bank);

        let mut store = SqliteStore::open_in_memory().unwrap();
        loaded.import_into(&mut store).unwrap();
        assert!(store.get_configuration("sql-essentials").unwrap().is_some());
        assert_eq!(
            store.get_questions("sql-essentials").unwrap().len(),
            bank.questions.len()
        );
    }

    #[test]
    fn test_demo_banks_are_embedded() {
        let names = demo_bank_names();
        assert_eq!(names, vec!["rust-fundamentals", "sql-essentials"]);
        for name in names {
            let bank = demo_bank(&name).unwrap();
            let config = bank.configuration.as_ref().unwrap();
            assert_eq!(config.module_id, name);
            assert!(bank.questions.iter().all(|q| q.module_id == name));
        }
        assert!(demo_bank("missing").is_err());
    }
}
