//! CLI integration tests.
//!
//! Runs the `topic-check` binary against config and snapshot files written to
//! a temporary directory.

use crate::mocks::{topic_yaml, CLUSTER_YAML};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "brokers": [
    { "id": 1, "host": "broker-1:9092", "rack": "a" },
    { "id": 2, "host": "broker-2:9092", "rack": "b" },
    { "id": 3, "host": "broker-3:9092", "rack": "c" }
  ],
  "topics": [
    {
      "name": "events",
      "config": { "cleanup.policy": "delete" },
      "partitions": [
        { "id": 0, "leader": 1, "replicas": [1, 2, 3], "isr": [1, 2, 3] },
        { "id": 1, "leader": 2, "replicas": [2, 3, 1], "isr": [2, 3, 1] },
        { "id": 2, "leader": 3, "replicas": [3, 1, 2], "isr": [3, 1, 2] }
      ]
    }
  ]
}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let workspace = Workspace {
            dir: TempDir::new().unwrap(),
        };
        workspace.write("cluster.yaml", CLUSTER_YAML);
        workspace.write("snapshot.json", SNAPSHOT);
        workspace
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// `topic-check check` with the cluster config and snapshot preset.
    fn check(&self) -> Command {
        let mut cmd = topic_check();
        cmd.arg("check")
            .arg("--cluster-config")
            .arg(self.path("cluster.yaml"))
            .arg("--snapshot")
            .arg(self.path("snapshot.json"))
            .arg("--no-color");
        cmd
    }
}

fn topic_check() -> Command {
    let mut cmd = Command::cargo_bin("topic-check").unwrap();
    cmd.env_remove("TOPIC_CHECK_FORMAT").env_remove("RUST_LOG");
    cmd
}

fn events_yaml(settings: &str) -> String {
    format!("{}  settings:\n{}", topic_yaml("events", 3, 3), settings)
}

#[test]
fn test_list_command() {
    topic_check()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("config-correct"))
        .stdout(predicate::str::contains("leaders-correct"));
}

#[test]
fn test_version_command() {
    topic_check()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("topic-check "));
}

#[test]
fn test_passing_topic_exits_zero() {
    let ws = Workspace::new();
    let topic = ws.write("events.yaml", &events_yaml("    cleanup.policy: delete\n"));

    ws.check()
        .arg(topic)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("TOPIC events"))
        .stdout(predicate::str::contains("[PASS] config-settings-correct"))
        .stdout(predicate::str::contains("SUMMARY: 1 topics, 7 passed, 0 failed"));
}

#[test]
fn test_drifted_topic_exits_one() {
    let ws = Workspace::new();
    let topic = ws.write("events.yaml", &events_yaml("    cleanup.policy: compact\n"));

    ws.check()
        .arg(topic)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "[FAIL] config-settings-correct: Config Settings Correct \
             (1 keys have different values between cluster and topic config: cleanup.policy)",
        ));
}

#[test]
fn test_missing_topic_and_leaders() {
    let ws = Workspace::new();
    let topic = ws.write("orders.yaml", &topic_yaml("orders", 3, 3));

    ws.check()
        .arg("--check-leaders")
        .arg("--format")
        .arg("json")
        .arg(topic)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"config-settings-correct\"").not())
        .stdout(predicate::str::contains("\"leaders-correct\""));
}

#[test]
fn test_json_output() {
    let ws = Workspace::new();
    let events = ws.write("events.yaml", &events_yaml("    cleanup.policy: delete\n"));
    let orders = ws.write("orders.yaml", &topic_yaml("orders", 4, 3));

    let output = ws
        .check()
        .args(["--format", "json"])
        .arg(events)
        .arg(orders)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["topics"][0]["topic"], "events");
    assert_eq!(json["topics"][0]["passed"], true);
    assert_eq!(json["topics"][1]["topic"], "orders");
    assert_eq!(json["topics"][1]["passed"], false);
    assert_eq!(json["summary"]["failed"], 1);
}

#[test]
fn test_format_from_environment() {
    let ws = Workspace::new();
    let topic = ws.write("events.yaml", &events_yaml("    cleanup.policy: delete\n"));

    ws.check()
        .env("TOPIC_CHECK_FORMAT", "junit")
        .arg(topic)
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("classname=\"topic-check.events\""));
}

#[test]
fn test_validate_only_without_snapshot() {
    let ws = Workspace::new();
    let topic = ws.write("events.yaml", &topic_yaml("events", 5, 3));

    topic_check()
        .arg("check")
        .arg("--cluster-config")
        .arg(ws.path("cluster.yaml"))
        .arg("--validate-only")
        .arg("--no-color")
        .arg(topic)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("SUMMARY: 1 topics, 2 passed, 0 failed"));
}

#[test]
fn test_invalid_topic_config_exits_one() {
    let ws = Workspace::new();
    let topic = ws.write("events.yaml", &topic_yaml("events", 0, 3));

    ws.check()
        .arg(topic)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "config validation error: partitions must be a positive number",
        ));
}

#[test]
fn test_missing_config_file_exits_three() {
    let ws = Workspace::new();

    ws.check()
        .arg(ws.path("absent.yaml"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error: failed to read"));
}

#[test]
fn test_malformed_snapshot_exits_three() {
    let ws = Workspace::new();
    ws.write("snapshot.json", "{ not json");
    let topic = ws.write("events.yaml", &topic_yaml("events", 3, 3));

    ws.check()
        .arg(topic)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to parse snapshot"));
}

#[test]
fn test_snapshot_required() {
    let ws = Workspace::new();
    let topic = ws.write("events.yaml", &topic_yaml("events", 3, 3));

    topic_check()
        .arg("check")
        .arg("--cluster-config")
        .arg(ws.path("cluster.yaml"))
        .arg(topic)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--snapshot"));
}
