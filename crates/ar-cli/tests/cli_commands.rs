//! Integration tests for the CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Write a config file with a three-character roster.
fn test_config() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("aether.toml"),
        "roster = [\"Kragg\", \"Etalus\", \"Forsburn\"]\nseed = 42\n",
    )
    .unwrap();
    dir
}

fn aether() -> Command {
    let mut cmd = Command::cargo_bin("aether").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

fn json_lines(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// shuffle
// ---------------------------------------------------------------------------

#[test]
fn shuffle_is_deterministic_for_a_seed() {
    let first = stdout_of(aether().args(["shuffle", "--len", "5", "--seed", "1234", "--json"]));
    let second = stdout_of(aether().args(["shuffle", "--len", "5", "--seed", "1234", "--json"]));
    assert_eq!(first, second);

    let reply: Value = serde_json::from_str(first.trim()).unwrap();
    assert_eq!(reply["ok"], true);
    assert_eq!(reply["seed"], 1234);
    let mut order: Vec<u64> = reply["order"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect();
    order.sort_unstable();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
}

#[test]
fn shuffle_empty() {
    aether()
        .args(["shuffle", "--len", "0", "--seed", "9", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"order\":[]"));
}

#[test]
fn shuffle_rejects_oversized_length() {
    aether()
        .args(["shuffle", "--len", "5000", "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 4096"));
}

#[test]
fn shuffle_roster_names() {
    let dir = test_config();
    let config = dir.path().join("aether.toml");
    aether()
        .args(["shuffle", "-c", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("seed=42")
                .and(predicate::str::contains("Kragg"))
                .and(predicate::str::contains("Etalus"))
                .and(predicate::str::contains("Forsburn")),
        );
}

// ---------------------------------------------------------------------------
// roster / config
// ---------------------------------------------------------------------------

#[test]
fn roster_lists_default_cast() {
    aether()
        .arg("roster")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("14 characters")
                .and(predicate::str::contains("Zetterburn"))
                .and(predicate::str::contains("Ranno")),
        );
}

#[test]
fn roster_from_config() {
    let dir = test_config();
    let config = dir.path().join("aether.toml");
    aether()
        .args(["roster", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 characters")
                .and(predicate::str::contains("Fixed seed: 42"))
                .and(predicate::str::contains("Absa").not()),
        );
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "roster = [\"Absa\", \"Absa\"]\n").unwrap();
    aether()
        .args(["roster", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate character in roster: Absa"));
}

#[test]
fn missing_config_fails() {
    aether()
        .args(["roster", "--config", "/nonexistent/aether.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

// ---------------------------------------------------------------------------
// serve
// ---------------------------------------------------------------------------

#[test]
fn serve_runs_a_full_lifecycle() {
    let requests = [
        r#"{"op":"get_run_state"}"#,
        r#"{"op":"start_run","characters":["Kragg","Etalus","Forsburn"],"seed":42}"#,
        r#"{"op":"complete_character","character":"Etalus"}"#,
        r#"{"op":"fail_run"}"#,
        r#"{"op":"complete_character","character":"Kragg"}"#,
        r#"{"op":"reset_run"}"#,
        r#"{"op":"reset_run"}"#,
    ]
    .join("\n");

    let stdout = stdout_of(aether().arg("serve").write_stdin(requests));
    let replies = json_lines(&stdout);
    assert_eq!(replies.len(), 7);

    assert_eq!(replies[0]["state"]["run_id"], 0);

    assert_eq!(replies[1]["ok"], true);
    assert_eq!(replies[1]["state"]["run_id"], 1);
    assert_eq!(replies[1]["state"]["queue"].as_array().unwrap().len(), 3);

    assert_eq!(replies[2]["state"]["completed"], serde_json::json!(["Etalus"]));
    assert_eq!(replies[2]["state"]["queue"].as_array().unwrap().len(), 2);

    assert_eq!(replies[3]["state"]["failed"], true);

    assert_eq!(replies[4]["ok"], false);
    assert_eq!(replies[4]["error"]["kind"], "illegal_transition");

    assert_eq!(replies[5]["state"]["run_id"], 0);
    assert_eq!(replies[5]["state"]["started_at_ms"], Value::Null);

    assert_eq!(replies[6]["ok"], false);
    assert_eq!(replies[6]["error"]["kind"], "no_active_run");
}

#[test]
fn serve_survives_bad_requests() {
    let requests = "garbage\n\n{\"op\":\"start_run\",\"seed\":1}\n";
    let stdout = stdout_of(aether().arg("serve").write_stdin(requests));
    let replies = json_lines(&stdout);
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["error"]["kind"], "bad_request");
    assert_eq!(replies[1]["state"]["queue"].as_array().unwrap().len(), 14);
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_session() {
    let dir = test_config();
    let config = dir.path().join("aether.toml");
    aether()
        .args(["play", "--config", config.to_str().unwrap()])
        .write_stdin("start\ndone Kragg\nfail\ndone Etalus\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Run #1")
                .and(predicate::str::contains("1/3 completed (33%)"))
                .and(predicate::str::contains("FAILED"))
                .and(predicate::str::contains("illegal transition"))
                .and(predicate::str::contains("Goodbye!")),
        );
}

#[test]
fn play_ends_on_eof() {
    aether()
        .arg("play")
        .write_stdin("status\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No run in progress"));
}
