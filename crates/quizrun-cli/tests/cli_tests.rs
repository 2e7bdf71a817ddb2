//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BANK_CSV: &str = "\
question,option1,option2,option3,option4,answer
First?,a1,b1,c1,d1,b1
Second?,a2,b2,c2,d2,b2
Third?,a3,b3,c3,d3,b3
";

fn quizrun() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizrun").unwrap()
}

fn write_bank(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("bank.csv");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_valid_bank() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), BANK_CSV);

    quizrun()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions"))
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn validate_reports_unscorable_answer() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(
        dir.path(),
        "question,option1,option2,option3,option4,answer\nOdd?,a,b,c,d,e\n",
    );

    quizrun()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Odd?] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_missing_column() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(
        dir.path(),
        "question,option1,option2,option4,answer\nQ,a,b,d,a\n",
    );

    quizrun()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required columns: option3"));
}

#[test]
fn validate_nonexistent_file() {
    quizrun()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_empty_bank() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), "question,option1,option2,option3,option4,answer\n");

    quizrun()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions found"));
}

#[test]
fn run_rejects_non_numeric_time_limit() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), BANK_CSV);

    quizrun()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .arg("--time-limit")
        .arg("abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "timeLimitMinutesInput is not a number",
        ));
}

#[test]
fn run_rejects_zero_questions() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), BANK_CSV);

    quizrun()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .arg("--questions")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "questionCountInput must be greater than zero",
        ));
}

#[test]
fn run_rejects_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), BANK_CSV);

    quizrun()
        .current_dir(dir.path())
        .arg("run")
        .arg("--bank")
        .arg(&bank)
        .arg("--config")
        .arg("missing.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizrun()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizrun.toml"))
        .stdout(predicate::str::contains("Created questions.csv"));

    assert!(dir.path().join("quizrun.toml").exists());
    assert!(dir.path().join("questions.csv").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("quizrun.toml"), "# existing").unwrap();

    quizrun()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let content = std::fs::read_to_string(dir.path().join("quizrun.toml")).unwrap();
    assert_eq!(content, "# existing");
}

#[test]
fn init_output_is_a_valid_bank() {
    let dir = TempDir::new().unwrap();

    quizrun().current_dir(dir.path()).arg("init").assert().success();

    quizrun()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("questions.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("7 questions"))
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn help_shows_commands() {
    quizrun()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    quizrun()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizrun"));
}
