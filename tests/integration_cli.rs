// Drives the compiled binary against a temporary database and settings file.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn skillcheck(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("skillcheck").unwrap();
    cmd.arg("--db")
        .arg(dir.join("bank.db"))
        .arg("--config")
        .arg(dir.join("settings.json"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

const BANK: &str = r#"
{
  "configuration": {
    "module_id": "networking",
    "mcq_count": 4,
    "coding_count": 1,
    "scenario_count": 0,
    "total_time_minutes": 20,
    "difficulty_distribution": {"beginner": 50, "intermediate": 25, "advanced": 25}
  },
  "questions": [
    {"id": "n1", "question_type": "mcq", "difficulty": "beginner", "title": "OSI layers", "correct_answer": "7"},
    {"id": "n2", "question_type": "mcq", "difficulty": "beginner", "title": "TCP handshake"},
    {"id": "n3", "question_type": "mcq", "difficulty": "intermediate", "title": "Subnet masks"},
    {"id": "n4", "question_type": "mcq", "difficulty": "intermediate", "title": "DNS caching"},
    {"id": "n5", "question_type": "mcq", "difficulty": "advanced", "title": "BGP route selection"},
    {"id": "n6", "question_type": "coding", "difficulty": "advanced", "title": "Parse an IPv4 header"}
  ]
}
"#;

fn imported() -> TempDir {
    let dir = tempdir().unwrap();
    let bank = dir.path().join("networking.json");
    fs::write(&bank, BANK).unwrap();
    let out = stdout_of(skillcheck(dir.path()).arg("import").arg(&bank));
    assert!(out.contains("imported 6 questions and a configuration"), "{out}");
    dir
}

#[test]
fn import_then_generate_preview() {
    let dir = imported();
    let out = stdout_of(skillcheck(dir.path()).args(["generate", "networking"]));

    assert!(out.contains("Assessment preview: networking"), "{out}");
    assert!(out.contains("5 questions"), "{out}");
    assert!(out.contains("20 minutes"), "{out}");
    assert!(out.contains("types: mcq 4, coding 1, scenario 0"), "{out}");
}

#[test]
fn generate_json_output() {
    let dir = imported();
    let out = stdout_of(skillcheck(dir.path()).args(["generate", "networking", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["questions"].as_array().unwrap().len(), 5);
    assert_eq!(value["metadata"]["total_questions"], 5);
    assert_eq!(value["metadata"]["mcq_count"], 4);
    assert_eq!(value["config"]["module_id"], "networking");
}

#[test]
fn check_reports_readiness() {
    let dir = imported();
    let out = stdout_of(skillcheck(dir.path()).args(["check", "networking"]));
    assert!(out.contains("status: ready"), "{out}");
}

#[test]
fn csv_import_and_shortfall() {
    let dir = imported();
    let csv = dir.path().join("extra.csv");
    fs::write(
        &csv,
        "id,question_type,difficulty,title\nx1,scenario,beginner,Outage triage\n",
    )
    .unwrap();

    let out = stdout_of(
        skillcheck(dir.path())
            .args(["import", "--module", "networking"])
            .arg(&csv),
    );
    assert!(out.contains("imported 1 questions"), "{out}");

    let out = stdout_of(skillcheck(dir.path()).arg("modules"));
    assert!(out.contains("networking\t7 questions"), "{out}");

    // raise the mcq target beyond the pool by re-importing the configuration only
    let cfg = dir.path().join("cfg.json");
    fs::write(
        &cfg,
        r#"{"configuration": {"module_id": "networking", "mcq_count": 9, "scenario_count": 3, "total_time_minutes": 20}}"#,
    )
    .unwrap();
    stdout_of(skillcheck(dir.path()).arg("import").arg(&cfg));

    let output = skillcheck(dir.path())
        .args(["generate", "networking"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("mcq requires 9 but only 5 available"),
        "{stderr}"
    );
    assert!(
        stderr.contains("scenario requires 3 but only 1 available"),
        "{stderr}"
    );

    let output = skillcheck(dir.path())
        .args(["check", "networking"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn missing_configuration_fails() {
    let dir = tempdir().unwrap();
    let output = skillcheck(dir.path())
        .args(["generate", "nowhere"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("no assessment configuration exists for module 'nowhere'"));
}

#[test]
fn demo_runs_without_database() {
    let dir = tempdir().unwrap();
    let out = stdout_of(skillcheck(dir.path()).args(["demo", "sql-essentials"]));
    assert!(out.contains("Assessment preview: sql-essentials"), "{out}");
    assert!(out.contains("6 questions"), "{out}");
    assert!(!dir.path().join("bank.db").exists());
}

#[test]
fn settings_are_persisted() {
    let dir = tempdir().unwrap();
    stdout_of(skillcheck(dir.path()).args(["settings", "--set-json", "true"]));

    let saved = fs::read_to_string(dir.path().join("settings.json")).unwrap();
    assert!(saved.contains("\"json_output\": true"), "{saved}");

    // json output is now the default
    let out = stdout_of(skillcheck(dir.path()).args(["demo", "rust-fundamentals"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["metadata"]["total_questions"], 10);
}
