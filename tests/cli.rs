use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// 2024-06-12 is a Wednesday
const NOW: &str = "2024-06-12T20:00:00";

const TASKS: &str = r#"[
    {"id": "a", "title": "Plan sprint", "status": "completed", "priority": "high",
     "tags": ["work"], "projectId": "q2", "createdAt": "2024-06-10T09:00:00",
     "completedAt": "2024-06-10T11:00:00", "actualDuration": 30.0},
    {"id": "b", "title": "Review PR", "status": "completed", "tags": ["work"],
     "createdAt": "2024-06-11T09:00:00", "completedAt": "2024-06-11T15:00:00"},
    {"id": "c", "title": "Groceries", "status": "completed", "tags": ["home"],
     "createdAt": "2024-06-12T08:00:00", "completedAt": "2024-06-12T15:30:00"},
    {"id": "d", "title": "Taxes", "status": "pending", "priority": "urgent",
     "createdAt": "2024-06-12T10:00:00"}
]"#;

struct Fixture {
    home: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        std::fs::write(home.path().join("export.json"), TASKS).unwrap();
        Self { home }
    }

    fn tasks_file(&self) -> std::path::PathBuf {
        self.home.path().join("export.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskpulse").unwrap();
        cmd.env("TASKPULSE_HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("TASKPULSE_CONFIG")
            .env_remove("RUST_LOG")
            .args(["--now", NOW]);
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .arg("--tasks")
            .arg(self.tasks_file())
            .args(["--output", "json"])
            .args(args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("taskpulse")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("streak"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn streak_json() {
    let fixture = Fixture::new();
    let value = fixture.json(&["streak"]);

    assert_eq!(value["currentStreak"], 3);
    assert_eq!(value["longestStreak"], 3);
    assert_eq!(value["isStreakActive"], true);
    assert_eq!(value["lastCompletionDate"], "2024-06-12");
    assert_eq!(value["streakStartDate"], "2024-06-10");
}

#[test]
fn summary_json_this_week() {
    let fixture = Fixture::new();
    let value = fixture.json(&["summary", "--period", "this-week"]);

    assert_eq!(value["period"], "this-week");
    let summary = &value["summary"];
    assert_eq!(summary["startDate"], "2024-06-10T00:00:00");
    assert_eq!(summary["endDate"], "2024-06-17T00:00:00");
    assert_eq!(summary["totalTasks"], 4);
    assert_eq!(summary["completedTasks"], 3);
    assert_eq!(summary["pendingTasks"], 1);
    assert_eq!(summary["completionRate"], 0.75);
    assert_eq!(summary["tasksByTag"]["work"], 2);
    assert_eq!(summary["tasksByProject"]["q2"], 1);
    assert_eq!(summary["dailyStats"].as_array().unwrap().len(), 7);
}

#[test]
fn summary_pretty() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("--tasks")
        .arg(fixture.tasks_file())
        .args(["summary", "-p", "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: Today"))
        .stdout(predicate::str::contains("Total tasks:     2"));
}

#[test]
fn custom_range_with_from_and_to() {
    let fixture = Fixture::new();
    let value = fixture.json(&["daily", "--from", "2024-06-10", "--to", "2024-06-11"]);

    assert_eq!(value["count"], 2);
    assert_eq!(value["items"][0]["date"], "2024-06-10");
    assert_eq!(value["items"][0]["completedTasks"], 1);
}

#[test]
fn reversed_custom_range_fails() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("--tasks")
        .arg(fixture.tasks_file())
        .args(["summary", "--from", "2024-06-11", "--to", "2024-06-10"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid date range"));
}

#[test]
fn categories_with_limit() {
    let fixture = Fixture::new();
    let value = fixture.json(&["categories", "-p", "last-7-days", "--limit", "2"]);

    assert_eq!(value["count"], 2);
    assert_eq!(value["items"][0]["categoryName"], "work");
    assert_eq!(value["items"][0]["completionRate"], 1.0);
}

#[test]
fn hourly_and_weekday() {
    let fixture = Fixture::new();

    let hourly = fixture.json(&["hourly"]);
    assert_eq!(hourly["peakHour"], 15);
    assert_eq!(hourly["hours"]["11"], 1);

    let weekday = fixture.json(&["weekday"]);
    assert_eq!(weekday["weekdays"]["2"], 1);
    assert_eq!(weekday["peakWeekday"], "Monday");
}

#[test]
fn trend_interval() {
    let fixture = Fixture::new();
    let value = fixture.json(&["trend", "-p", "last-7-days", "--interval", "7"]);

    assert_eq!(value["intervalDays"], 7);
    assert_eq!(value["rates"].as_array().unwrap().len(), 1);
    assert_eq!(value["rates"][0], 0.75);
}

#[test]
fn zero_trend_interval_fails() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("--tasks")
        .arg(fixture.tasks_file())
        .args(["trend", "--interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid trend interval"));
}

#[test]
fn missing_tasks_file_fails() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["--tasks", "/nonexistent/tasks.json", "streak"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("Failed to read task file"));
}

#[test]
fn productivity_json() {
    let fixture = Fixture::new();
    let value = fixture.json(&["productivity"]);

    assert_eq!(value["tasksCompletedThisWeek"], 3);
    assert_eq!(value["currentStreak"], 3);
    assert_eq!(value["weeklyTrend"].as_array().unwrap().len(), 7);
    assert_eq!(value["monthlyTrend"].as_array().unwrap().len(), 30);
}

#[test]
fn import_then_read_default_store() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .arg("import")
        .arg(fixture.tasks_file())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 4 tasks"));

    assert!(fixture.home.path().join("taskpulse.db").exists());

    let output = fixture
        .cmd()
        .args(["-o", "json", "summary", "-p", "this-week"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["totalTasks"], 4);
}

#[test]
fn empty_default_store() {
    let fixture = Fixture::new();
    let output = fixture.cmd().args(["-o", "json", "streak"]).output().unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["currentStreak"], 0);
    assert!(value["lastCompletionDate"].is_null());
}

#[test]
fn config_sets_defaults() {
    let fixture = Fixture::new();
    write(
        &fixture.home.path().join("config.yaml"),
        &format!(
            "general:\n  default_output: json\nanalytics:\n  default_period: this-week\nsource:\n  kind: json\n  path: {}\n",
            fixture.tasks_file().display()
        ),
    );

    let output = fixture.cmd().arg("summary").output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["period"], "this-week");
    assert_eq!(value["summary"]["totalTasks"], 4);
}

#[test]
fn malformed_config_fails() {
    let fixture = Fixture::new();
    let config = fixture.home.path().join("broken.yaml");
    write(&config, "analytics: [1, 2");

    fixture
        .cmd()
        .arg("--config")
        .arg(&config)
        .arg("streak")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn huge_trend_interval_gives_one_rate() {
    let fixture = Fixture::new();
    let value = fixture.json(&["trend", "-p", "last-7-days", "--interval", "100000000"]);

    assert_eq!(value["rates"].as_array().unwrap().len(), 1);
    assert_eq!(value["rates"][0], 0.75);
}
