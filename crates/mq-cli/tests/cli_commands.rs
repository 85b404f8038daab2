//! Integration tests for the mq CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A rules file where the crypt cannot be reached from anywhere.
const ISOLATED_RULES: &str = r#"{
    "adjacency": {
        "street": ["street", "urban"],
        "urban": ["urban", "street"],
        "crypt": []
    },
    "levels": { "street": 0, "urban": 0, "crypt": -1 }
}"#;

fn mq() -> Command {
    Command::cargo_bin("mq").unwrap()
}

// ---------------------------------------------------------------------------
// lint
// ---------------------------------------------------------------------------

#[test]
fn lint_standard_rules() {
    mq().arg("lint")
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn lint_isolated_category_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    fs::write(&path, ISOLATED_RULES).unwrap();

    mq().args(["lint", "--rules"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("crypt: has no neighbors"))
        .stderr(predicate::str::contains("error"));
}

#[test]
fn lint_missing_file() {
    mq().args(["lint", "--rules", "/nonexistent/rules.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn lint_rules_without_levels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    fs::write(
        &path,
        r#"{"adjacency": {"street": ["street", "room"]}, "levels": {"street": 0}}"#,
    )
    .unwrap();

    mq().args(["lint", "--rules"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("room"));
}

// ---------------------------------------------------------------------------
// doom
// ---------------------------------------------------------------------------

#[test]
fn doom_middle_band() {
    mq().args(["doom", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uneasy"))
        .stdout(predicate::str::contains("Enemy damage +1, player dice +0"));
}

#[test]
fn doom_high_is_calm() {
    mq().args(["doom", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("calm"));
}

#[test]
fn doom_negative_is_dire() {
    mq().args(["doom", "-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dire"))
        .stdout(predicate::str::contains("player dice -1"));
}

// ---------------------------------------------------------------------------
// desperate
// ---------------------------------------------------------------------------

#[test]
fn desperate_cornered() {
    mq().args(["desperate", "1", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cornered"))
        .stdout(predicate::str::contains(
            "Active: Adrenaline Surge, Cornered, Reckless Swing",
        ))
        .stdout(predicate::str::contains("intellect"));
}

#[test]
fn desperate_healthy() {
    mq().args(["desperate", "5", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No desperate measures active"));
}

// ---------------------------------------------------------------------------
// odds
// ---------------------------------------------------------------------------

#[test]
fn odds_table() {
    mq().args(["odds", "--max-dice", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pass chance"))
        .stdout(predicate::str::contains("50.0%"))
        .stdout(predicate::str::contains("87.5%"));
}

#[test]
fn odds_rejects_bad_dc() {
    mq().args(["odds", "--dc", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dc must be between 1 and 6"));
}

// ---------------------------------------------------------------------------
// combat
// ---------------------------------------------------------------------------

#[test]
fn combat_player_attack() {
    mq().args(["combat", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Player attack"))
        .stdout(predicate::str::contains("vs DC 4"));
}

#[test]
fn combat_enemy_attack_when_desperate() {
    mq().args(["combat", "--enemy", "--hp", "1", "--sanity", "1", "--doom", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enemy attack"))
        .stdout(predicate::str::contains("Last Stand"))
        .stdout(predicate::str::contains("enemy damage +2, player dice -1"));
}

#[test]
fn combat_is_deterministic_per_seed() {
    let first = mq().args(["combat", "--seed", "11"]).output().unwrap();
    let second = mq().args(["combat", "--seed", "11"]).output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

// ---------------------------------------------------------------------------
// explore
// ---------------------------------------------------------------------------

#[test]
fn explore_saves_map() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("map.json");

    mq().args(["explore", "--steps", "8", "--seed", "3", "--save"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exploration"))
        .stdout(predicate::str::contains("Saved"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let tiles = json.as_array().unwrap();
    assert!(!tiles.is_empty());
    assert!(tiles.len() <= 9);
}

#[test]
fn explore_indoor_from_room_stays_indoors() {
    let output = mq()
        .args(["explore", "--start", "room", "--prefer", "indoor", "--steps", "15"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("nature "));
    assert!(!stdout.contains("street "));
}

#[test]
fn explore_rejects_unknown_preference() {
    mq().args(["explore", "--prefer", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown preference"));
}

// ---------------------------------------------------------------------------
// crawl
// ---------------------------------------------------------------------------

#[test]
fn crawl_save_and_resume() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    mq().args(["crawl", "--turns", "4", "--save"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("searched"))
        .stdout(predicate::str::contains("Saved"));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let doom = saved["doom"]["value"].as_i64().unwrap();
    assert!(doom < 12);

    mq().args(["crawl", "--turns", "2", "--resume"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("doom {doom} (")));
}

#[test]
fn crawl_rejects_tampered_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    mq().args(["crawl", "--turns", "1", "--save"])
        .arg(&path)
        .assert()
        .success();

    let mut saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    saved["position"] = serde_json::json!({"q": 50, "r": 50});
    fs::write(&path, saved.to_string()).unwrap();

    mq().args(["crawl", "--resume"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not on the map"));
}

#[test]
fn crawl_refuses_broken_rules() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    fs::write(&path, ISOLATED_RULES).unwrap();

    mq().args(["crawl", "--rules"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rules failed lint"));
}
