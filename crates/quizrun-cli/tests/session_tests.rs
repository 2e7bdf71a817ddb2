//! End-to-end quiz sessions driven through stdin.
//!
//! Every question in the test bank has its correct answer in the second
//! position, so the outcome does not depend on the shuffled order.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use quizrun_core::engine::SubmittedBy;
use quizrun_core::report::SessionReport;

const BANK_CSV: &str = "\
question,option1,option2,option3,option4,answer
First?,a1,b1,c1,d1,b1
Second?,a2,b2,c2,d2,b2
Third?,a3,b3,c3,d3,b3
";

/// Speeds the countdown up so a one-minute limit expires quickly.
const FAST_CONFIG: &str = "tick_interval_ms = 1\n";

fn quizrun() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizrun").unwrap()
}

fn setup(config: Option<&str>) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.csv");
    std::fs::write(&bank, BANK_CSV).unwrap();
    if let Some(config) = config {
        std::fs::write(dir.path().join("quizrun.toml"), config).unwrap();
    }
    (dir, bank)
}

fn run_cmd(dir: &Path, bank: &Path) -> Command {
    let mut cmd = quizrun();
    cmd.current_dir(dir)
        .arg("run")
        .arg("--bank")
        .arg(bank)
        .arg("--time-limit")
        .arg("1")
        .arg("--positive")
        .arg("1")
        .arg("--negative")
        .arg("-0.5");
    cmd
}

#[test]
fn all_correct_then_submit() {
    let (dir, bank) = setup(None);

    run_cmd(dir.path(), &bank)
        .write_stdin("2\nn\n2\nn\n2\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/3"))
        .stdout(predicate::str::contains("Question 3/3"))
        .stdout(predicate::str::contains("[s] submit"))
        .stdout(predicate::str::contains("Your Score: 3"))
        .stdout(predicate::str::contains("Correct: 3  Wrong: 0  Unanswered: 0"));
}

#[test]
fn one_right_one_wrong_scores_half() {
    let (dir, bank) = setup(None);

    run_cmd(dir.path(), &bank)
        .arg("--questions")
        .arg("2")
        .write_stdin("2\nn\n3\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/2"))
        .stdout(predicate::str::contains("Your Score: 0.5"));
}

#[test]
fn answers_can_be_changed_before_submitting() {
    let (dir, bank) = setup(None);

    run_cmd(dir.path(), &bank)
        .arg("--questions")
        .arg("2")
        .write_stdin("1\nn\n2\np\n2\nn\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your Score: 2"));
}

#[test]
fn question_count_larger_than_bank_uses_whole_bank() {
    let (dir, bank) = setup(Some(FAST_CONFIG));

    run_cmd(dir.path(), &bank)
        .arg("--questions")
        .arg("10")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/3"));
}

#[test]
fn timeout_submits_with_missing_answers_penalised() {
    let (dir, bank) = setup(Some(FAST_CONFIG));

    run_cmd(dir.path(), &bank)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time is up!"))
        .stdout(predicate::str::contains("Your Score: -1.5"))
        .stdout(predicate::str::contains("Unanswered: 3"));
}

#[test]
fn early_submit_is_not_available() {
    let (dir, bank) = setup(Some(FAST_CONFIG));

    run_cmd(dir.path(), &bank)
        .write_stdin("2\ns\np\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not available: submit"))
        .stdout(predicate::str::contains("Not available: previous"))
        .stdout(predicate::str::contains("Time is up!"))
        .stdout(predicate::str::contains("Your Score: 0"));
}

#[test]
fn unknown_option_text_is_ignored() {
    let (dir, bank) = setup(Some(FAST_CONFIG));

    run_cmd(dir.path(), &bank)
        .arg("--questions")
        .arg("1")
        .write_stdin("banana\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not available: select 'banana'"))
        .stdout(predicate::str::contains("Not available: select option 9"))
        .stdout(predicate::str::contains("Your Score: -0.5"));
}

#[test]
fn report_is_saved_with_participant() {
    let (dir, bank) = setup(None);
    let reports = dir.path().join("reports");

    run_cmd(dir.path(), &bank)
        .arg("--name")
        .arg("Ada")
        .arg("--email")
        .arg("ada@example.com")
        .arg("--output")
        .arg(&reports)
        .write_stdin("2\nn\n1\nn\ns\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));

    let files: Vec<_> = std::fs::read_dir(&reports)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);

    let report = SessionReport::load_json(&files[0]).unwrap();
    let participant = report.participant.unwrap();
    assert_eq!(participant.name, "Ada");
    assert_eq!(participant.email, "ada@example.com");
    assert_eq!(report.submitted_by, SubmittedBy::Participant);
    assert_eq!(report.correct, 1);
    assert_eq!(report.wrong, 1);
    assert_eq!(report.unanswered, 1);
    assert_eq!(report.score, 0.0);
    assert_eq!(report.config.time_limit_seconds(), 60);
}

#[test]
fn output_dir_from_config_file() {
    let (dir, bank) = setup(Some("output_dir = \"saved\"\n"));

    run_cmd(dir.path(), &bank)
        .write_stdin("n\nn\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your Score: -1.5"));

    let saved = std::fs::read_dir(dir.path().join("saved")).unwrap().count();
    assert_eq!(saved, 1);
}
