#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

struct Env {
    temp: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("shelf"));
        cmd.env("SHELF_DATA", self.temp.path().join("data"))
            .env("SHELF_CONFIG", self.temp.path().join("shelf.toml"))
            .env("NO_COLOR", "1")
            .env_remove("SHELF_LOG");
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().args(args).arg("--json").output().unwrap();
        assert!(output.status.success(), "{:?} failed: {:?}", args, output);
        serde_json::from_slice(&output.stdout).unwrap()
    }

    fn data_file(&self, key: &str) -> std::path::PathBuf {
        self.temp.path().join("data").join(format!("{}.json", key))
    }
}

#[test]
fn test_my_list_survives_between_runs() {
    let env = Env::new();

    env.cmd()
        .args(["list", "add", "42", "The", "Matrix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to My List: The Matrix"));

    env.cmd()
        .args(["list", "add", "42", "The", "Matrix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already in My List"));

    let listed = env.json(&["list", "ls"]);
    let items = listed["listed"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], 42);
    assert_eq!(items[0]["kind"], "watch");
    assert_eq!(items[0]["title"], "The Matrix");

    let stored: Value = serde_json::from_str(&fs::read_to_string(env.data_file("myList")).unwrap()).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 1);
}

#[test]
fn test_naked_invocation_lists_my_list() {
    let env = Env::new();
    env.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("My List is empty."));
}

#[test]
fn test_progress_finishing_removes_entry() {
    let env = Env::new();

    env.cmd()
        .args(["progress", "set", "7", "--at", "600", "--duration", "3600", "Dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started: Dark (17%)"));

    let listed = env.json(&["progress", "ls"]);
    assert_eq!(listed["listed"][0]["progress"].as_f64().unwrap().round(), 17.0);

    env.cmd()
        .args(["progress", "set", "7", "--at", "3500", "--duration", "3600", "Dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished: Dark"));

    let listed = env.json(&["progress", "ls"]);
    assert!(listed["listed"].as_array().unwrap().is_empty());
}

#[test]
fn test_rating_out_of_range_fails() {
    let env = Env::new();
    env.cmd()
        .args(["rating", "set", "5", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
    assert!(!env.data_file("userRatings").exists());
}

#[test]
fn test_average_combines_ratings_and_reviews() {
    let env = Env::new();
    env.cmd().args(["rating", "set", "5", "4"]).assert().success();
    env.cmd()
        .args(["review", "post", "5", "2", "--author", "ana", "Too", "long"])
        .assert()
        .success();

    let result = env.json(&["rating", "avg", "5"]);
    assert_eq!(result["score"]["average"].as_f64(), Some(3.0));
    assert_eq!(result["score"]["count"], 2);
}

#[test]
fn test_like_missing_review_fails() {
    let env = Env::new();
    env.cmd()
        .args(["review", "like", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_group_watch_join_is_idempotent() {
    let env = Env::new();
    let scheduled = env.json(&[
        "group",
        "schedule",
        "9",
        "--host",
        "ana",
        "--at",
        "2099-01-01T20:00:00Z",
        "Movie",
        "Night",
    ]);
    let id = scheduled["listed"][0]["id"].as_str().unwrap().to_string();

    env.cmd().args(["group", "join", &id, "ben"]).assert().success();
    env.cmd()
        .args(["group", "join", &id, "ben"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in"));

    let listed = env.json(&["group", "ls"]);
    let participants = listed["listed"][0]["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
}

#[test]
fn test_corrupt_store_is_reported_not_fatal() {
    let env = Env::new();
    fs::create_dir_all(env.temp.path().join("data")).unwrap();
    fs::write(env.data_file("myList"), "{ not json").unwrap();

    env.cmd()
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("myList"))
        .stdout(predicate::str::contains("failed"));

    // Other stores keep working
    env.cmd().args(["rating", "set", "1", "5"]).assert().success();
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let env = Env::new();
    let other = env.temp.path().join("elsewhere");
    env.cmd()
        .args(["--data-dir", other.to_str().unwrap(), "list", "add", "1", "Heat"])
        .assert()
        .success();

    assert!(other.join("myList.json").exists());
    assert!(!env.data_file("myList").exists());
}

#[test]
fn test_review_id_from_text_listing_can_be_typed_back() {
    let env = Env::new();
    env.cmd()
        .args(["review", "post", "5", "4", "Nice"])
        .assert()
        .success();

    let output = env.cmd().args(["review", "ls"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .unwrap()
        .to_string();

    env.cmd().args(["review", "like", &id]).assert().success();
    let listed = env.json(&["review", "ls"]);
    assert_eq!(listed["listed"][0]["likes"], 1);

    env.cmd()
        .args(["review", "rm", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed review"));
    let listed = env.json(&["review", "ls"]);
    assert!(listed["listed"].as_array().unwrap().is_empty());
}
