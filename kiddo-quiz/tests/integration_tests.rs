//! Integration tests for the kiddo-quiz CLI
//!
//! Sessions run against the arithmetic category or a seeded offline cache,
//! with scripted stdin answers, so no test needs network access.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test environment with isolated config and data directories
struct TestEnv {
    _temp_dir: TempDir,
    config_path: PathBuf,
    db_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        Self::with_daily_limit(10)
    }

    fn with_daily_limit(daily_limit: u32) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().join("config");
        let data_dir = temp_dir.path().join("data");

        fs::create_dir_all(&config_dir).unwrap();
        fs::create_dir_all(&data_dir).unwrap();

        let db_path = data_dir.join("content.db");
        let escaped_db_path = db_path.to_string_lossy().replace('\\', "\\\\");

        let config_content = format!(
            r#"
[api]
base_url = "http://127.0.0.1:1/api/v1/content"
page_size = 10
timeout_secs = 2

[database]
path = "{}"

[quiz]
daily_limit = {}
batch_size = 8
"#,
            escaped_db_path, daily_limit
        );

        let config_path = config_dir.join("config.toml");
        fs::write(&config_path, config_content).unwrap();

        Self {
            _temp_dir: temp_dir,
            config_path,
            db_path,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("kiddo-quiz").unwrap();
        cmd.env("KIDDOLEARN_CONFIG", &self.config_path);
        cmd
    }
}

/// Eight answers, one per question in an arithmetic round
fn eight_answers() -> String {
    "1\n".repeat(8)
}

#[test]
fn test_full_arithmetic_session() {
    let env = TestEnv::new();

    // Generated questions list the correct rendering as the first option,
    // so always answering 1 scores a perfect round
    env.cmd()
        .write_stdin(eight_answers())
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 8"))
        .stdout(predicate::str::contains("Question 8 of 8"))
        .stdout(predicate::str::contains("Session score: 8 of 8 correct"))
        .stdout(predicate::str::contains("All time: 8 correct, 0 wrong, 8 completed"));
}

#[test]
fn test_session_ends_early_on_eof() {
    let env = TestEnv::new();

    env.cmd()
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session ended early."))
        .stdout(predicate::str::contains("Session score:"));
}

#[test]
fn test_invalid_input_reprompts() {
    let env = TestEnv::new();

    // "banana" and "9" are rejected, then seven more valid answers finish
    // the round
    let answers = format!("banana\n9\n{}", eight_answers());
    env.cmd()
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a number from 1 to 4"))
        .stdout(predicate::str::contains("Session score:"));
}

#[test]
fn test_daily_limit_gates_session() {
    let env = TestEnv::with_daily_limit(0);

    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily limit reached!"));
}

#[test]
fn test_daily_limit_stops_mid_session() {
    let env = TestEnv::with_daily_limit(3);

    // The third completed question hits the limit, so the round stops
    // before question 4 even though more answers are queued
    env.cmd()
        .write_stdin(eight_answers())
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 3 of 8"))
        .stdout(predicate::str::contains("Daily limit reached!"))
        .stdout(predicate::str::contains("Session score: 3 of 3 correct"))
        .stdout(predicate::str::contains("Question 4 of 8").not());
}

#[test]
fn test_scores_accumulate_across_sessions() {
    let env = TestEnv::new();

    env.cmd().write_stdin(eight_answers()).assert().success();

    // The second session hydrates the persisted counters and keeps counting
    env.cmd()
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All time: 9 correct, 0 wrong, 9 completed"));
}

#[test]
fn test_invalid_category_exit_code() {
    let env = TestEnv::new();

    env.cmd()
        .args(["--category", "dinosaur"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_remote_category_without_cache_reports_no_questions() {
    let env = TestEnv::new();

    // The endpoint is unreachable and nothing is cached, so no questions
    // can be loaded for a remote category
    env.cmd()
        .args(["--category", "flower"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no quiz questions available"));
}

#[tokio::test]
async fn test_question_without_options_is_skipped() {
    let env = TestEnv::new();

    // Seed the offline cache with an unanswerable question (no options to
    // pick from) next to a real one
    let db = libkiddo::Database::new(env.db_path.to_str().unwrap())
        .await
        .unwrap();
    let items = vec![
        libkiddo::ContentItem {
            id: "f0".to_string(),
            category: libkiddo::Category::Fruit,
            title: "Mango".to_string(),
            image_url: "https://cdn.example.com/mango.png".to_string(),
            sound_url: None,
            question: Some("Which fruit is this?".to_string()),
            options: Some(vec![]),
            correct_answer: Some("Mango".to_string()),
        },
        libkiddo::ContentItem {
            id: "f1".to_string(),
            category: libkiddo::Category::Fruit,
            title: "Apple".to_string(),
            image_url: "https://cdn.example.com/apple.png".to_string(),
            sound_url: None,
            question: Some("Which fruit keeps the doctor away?".to_string()),
            options: Some(vec!["Apple".to_string(), "Banana".to_string()]),
            correct_answer: Some("Apple".to_string()),
        },
    ];
    db.store_cached_content(libkiddo::Category::Fruit, &items)
        .await
        .unwrap();

    // The endpoint is unreachable, so the seeded cache serves the round;
    // only the answerable question makes it into the session
    env.cmd()
        .args(["--category", "fruit"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 1"))
        .stdout(predicate::str::contains("Session score: 1 of 1 correct"))
        .stdout(predicate::str::contains("(1-0)").not());
}
