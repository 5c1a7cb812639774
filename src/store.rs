use crate::assessment::{DifficultyDistribution, ModuleConfiguration, Question};
use crate::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Source of per-module assessment configurations
pub trait ConfigurationStore {
    fn get_configuration(&self, module_id: &str) -> Result<Option<ModuleConfiguration>>;
}

/// Source of the question pool currently assigned to a module
pub trait QuestionStore {
    fn get_questions(&self, module_id: &str) -> Result<Vec<Question>>;
}

impl<T: ConfigurationStore + ?Sized> ConfigurationStore for &T {
    fn get_configuration(&self, module_id: &str) -> Result<Option<ModuleConfiguration>> {
        (**self).get_configuration(module_id)
    }
}

impl<T: QuestionStore + ?Sized> QuestionStore for &T {
    fn get_questions(&self, module_id: &str) -> Result<Vec<Question>> {
        (**self).get_questions(module_id)
    }
}

/// HashMap-backed store for tests and embedded demo banks
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    configurations: HashMap<String, ModuleConfiguration>,
    questions: HashMap<String, Vec<Question>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_configuration(&mut self, config: ModuleConfiguration) {
        self.configurations.insert(config.module_id.clone(), config);
    }

    /// Ids are unique within a module; a repeated id replaces the earlier question
    pub fn add_question(&mut self, question: Question) {
        let pool = self.questions.entry(question.module_id.clone()).or_default();
        match pool.iter_mut().find(|q| q.id == question.id) {
            Some(existing) => *existing = question,
            None => pool.push(question),
        }
    }

    pub fn add_questions<I: IntoIterator<Item = Question>>(&mut self, questions: I) {
        for q in questions {
            self.add_question(q);
        }
    }
}

impl ConfigurationStore for MemoryStore {
    fn get_configuration(&self, module_id: &str) -> Result<Option<ModuleConfiguration>> {
        Ok(self.configurations.get(module_id).cloned())
    }
}

impl QuestionStore for MemoryStore {
    fn get_questions(&self, module_id: &str) -> Result<Vec<Question>> {
        Ok(self.questions.get(module_id).cloned().unwrap_or_default())
    }
}

/// Module and question-count listing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSummary {
    pub module_id: String,
    pub question_count: usize,
    pub configured: bool,
}

/// SQLite-backed configuration and question store
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS module_configurations (
    module_id TEXT PRIMARY KEY,
    mcq_count INTEGER NOT NULL DEFAULT 0,
    coding_count INTEGER NOT NULL DEFAULT 0,
    scenario_count INTEGER NOT NULL DEFAULT 0,
    total_time_minutes INTEGER NOT NULL,
    difficulty_distribution TEXT NOT NULL,
    updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS questions (
    id TEXT NOT NULL,
    module_id TEXT NOT NULL,
    question_type TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    title TEXT NOT NULL,
    prompt TEXT NOT NULL DEFAULT '',
    options TEXT NOT NULL DEFAULT '[]',
    correct_answer TEXT,
    explanation TEXT,
    points INTEGER NOT NULL DEFAULT 1,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (module_id, id)
);
"#;

const INSERT_QUESTION: &str = r#"
INSERT OR REPLACE INTO questions
(id, module_id, question_type, difficulty, title, prompt, options, correct_answer, explanation, points)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and ensure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { conn })
    }

    /// Insert or replace the single configuration row for a module
    pub fn save_configuration(&self, config: &ModuleConfiguration) -> Result<()> {
        config.validate()?;
        let distribution = serde_json::to_string(&config.difficulty_distribution)?;
        self.conn.execute(
            r#"
            INSERT INTO module_configurations
            (module_id, mcq_count, coding_count, scenario_count, total_time_minutes, difficulty_distribution)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(module_id) DO UPDATE SET
                mcq_count = excluded.mcq_count,
                coding_count = excluded.coding_count,
                scenario_count = excluded.scenario_count,
                total_time_minutes = excluded.total_time_minutes,
                difficulty_distribution = excluded.difficulty_distribution,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![
                config.module_id,
                config.mcq_count as i64,
                config.coding_count as i64,
                config.scenario_count as i64,
                config.total_time_minutes,
                distribution,
            ],
        )?;
        Ok(())
    }

    pub fn add_question(&self, question: &Question) -> Result<()> {
        insert_question(&self.conn, question)
    }

    /// Insert several questions in one transaction
    pub fn add_questions(&mut self, questions: &[Question]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for question in questions {
            insert_question(&tx, question)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Remove a module's configuration and every question assigned to it
    pub fn delete_module(&mut self, module_id: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM module_configurations WHERE module_id = ?1",
            [module_id],
        )?;
        tx.execute("DELETE FROM questions WHERE module_id = ?1", [module_id])?;
        tx.commit()?;
        Ok(())
    }

    pub fn list_modules(&self) -> Result<Vec<ModuleSummary>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT m.module_id,
                   (SELECT COUNT(*) FROM questions q WHERE q.module_id = m.module_id),
                   EXISTS (SELECT 1 FROM module_configurations c WHERE c.module_id = m.module_id)
            FROM (
                SELECT module_id FROM module_configurations
                UNION
                SELECT module_id FROM questions
            ) m
            ORDER BY m.module_id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let count: i64 = row.get(1)?;
            Ok(ModuleSummary {
                module_id: row.get(0)?,
                question_count: count as usize,
                configured: row.get(2)?,
            })
        })?;

        let mut modules = Vec::new();
        for row in rows {
            modules.push(row?);
        }
        Ok(modules)
    }
}

fn insert_question(conn: &Connection, question: &Question) -> Result<()> {
    let options = serde_json::to_string(&question.options)?;
    conn.execute(
        INSERT_QUESTION,
        params![
            question.id,
            question.module_id,
            question.question_type.to_string(),
            question.difficulty.to_string(),
            question.title,
            question.prompt,
            options,
            question.correct_answer,
            question.explanation,
            question.points,
        ],
    )?;
    Ok(())
}

fn text_column_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn question_from_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    let question_type: String = row.get(2)?;
    let difficulty: String = row.get(3)?;
    let options: String = row.get(6)?;

    Ok(Question {
        id: row.get(0)?,
        module_id: row.get(1)?,
        question_type: question_type.parse().map_err(|e| text_column_error(2, e))?,
        difficulty: difficulty.parse().map_err(|e| text_column_error(3, e))?,
        title: row.get(4)?,
        prompt: row.get(5)?,
        options: serde_json::from_str(&options).map_err(|e| text_column_error(6, e))?,
        correct_answer: row.get(7)?,
        explanation: row.get(8)?,
        points: row.get(9)?,
    })
}

impl ConfigurationStore for SqliteStore {
    fn get_configuration(&self, module_id: &str) -> Result<Option<ModuleConfiguration>> {
        let config = self
            .conn
            .query_row(
                r#"
                SELECT module_id, mcq_count, coding_count, scenario_count, total_time_minutes, difficulty_distribution
                FROM module_configurations
                WHERE module_id = ?1
                "#,
                [module_id],
                |row| {
                    let mcq: i64 = row.get(1)?;
                    let coding: i64 = row.get(2)?;
                    let scenario: i64 = row.get(3)?;
                    let distribution: String = row.get(5)?;
                    let distribution = serde_json::from_str::<serde_json::Value>(&distribution)
                        .map(|v| DifficultyDistribution::from_value(&v))
                        .unwrap_or_default();

                    Ok(ModuleConfiguration {
                        module_id: row.get(0)?,
                        mcq_count: mcq.max(0) as usize,
                        coding_count: coding.max(0) as usize,
                        scenario_count: scenario.max(0) as usize,
                        total_time_minutes: row.get(4)?,
                        difficulty_distribution: distribution,
                    })
                },
            )
            .optional()?;
        Ok(config)
    }
}

impl QuestionStore for SqliteStore {
    fn get_questions(&self, module_id: &str) -> Result<Vec<Question>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, module_id, question_type, difficulty, title, prompt, options, correct_answer, explanation, points
            FROM questions
            WHERE module_id = ?1
            ORDER BY created_at, id
            "#,
        )?;

        let rows = stmt.query_map([module_id], question_from_row)?;

        let mut questions = Vec::new();
        for q in rows {
            questions.push(q?);
        }
        Ok(questions)
    }
}
