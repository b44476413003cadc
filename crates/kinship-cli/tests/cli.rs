//! End-to-end tests for the `kinship` binary.
//!
//! Each test runs the CLI as a subprocess against its own temp data
//! directory and config file.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn kinship(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kinship").unwrap();
    cmd.env("KINSHIP_CONFIG", dir.path().join("config.toml"));
    cmd.env_remove("KINSHIP_DATA_DIR");
    cmd.env("RUST_LOG", "error");
    cmd.arg("--data-dir").arg(dir.path().join("data"));
    cmd
}

fn add_person(dir: &TempDir, name: &str, born: &str) -> String {
    let output = kinship(dir)
        .args(["--format", "json", "person", "add", name, "--born", born])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "person add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_person_add_and_list() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args([
            "person",
            "add",
            "Alice Smith",
            "--born",
            "1960-01-01",
            "--place",
            "Oslo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created person: Alice Smith (born 1960-01-01 in Oslo)",
        ));

    kinship(&dir)
        .args(["person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Smith"))
        .stdout(predicate::str::contains("NAME"));

    assert!(dir.path().join("data").join("persons.json").exists());
}

#[test]
fn test_empty_list() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["person", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No persons found"));
}

#[test]
fn test_person_add_validation_error() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["person", "add", "  ", "--born", "15/05/1990"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name is required"))
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_parent_add_and_tree() {
    let dir = TempDir::new().unwrap();
    let grandma = add_person(&dir, "Grandma", "1930-01-01");
    let mum = add_person(&dir, "Mum", "1960-01-01");
    let kid = add_person(&dir, "Kid", "1990-01-01");

    kinship(&dir)
        .args(["parent", "add", &mum, &grandma])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added parent"));
    kinship(&dir).args(["parent", "add", &kid, &mum]).assert().success();

    kinship(&dir)
        .args(["tree", &mum])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parents:"))
        .stdout(predicate::str::contains("Grandma"))
        .stdout(predicate::str::contains("Children:"))
        .stdout(predicate::str::contains("Kid"));

    let ancestors = json_output(kinship(&dir).args(["--format", "json", "ancestors", &kid]));
    let names: Vec<_> = ancestors
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Mum", "Grandma"]);

    let descendants =
        json_output(kinship(&dir).args(["--format", "json", "descendants", &grandma]));
    assert_eq!(descendants.as_array().unwrap().len(), 2);
}

#[test]
fn test_parent_add_rejects_cycle_and_age_gap() {
    let dir = TempDir::new().unwrap();
    let grandma = add_person(&dir, "Grandma", "1930-01-01");
    let mum = add_person(&dir, "Mum", "1960-01-01");
    kinship(&dir).args(["parent", "add", &mum, &grandma]).assert().success();

    kinship(&dir)
        .args(["parent", "add", &grandma, &mum])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parent must be at least 15 years older than child"))
        .stderr(predicate::str::contains("Cannot create cyclical relationship"));
}

#[test]
fn test_parent_remove_and_candidates() {
    let dir = TempDir::new().unwrap();
    let alice = add_person(&dir, "Alice", "1960-01-01");
    let bob = add_person(&dir, "Bob", "1985-01-01");

    let candidates =
        json_output(kinship(&dir).args(["--format", "json", "parent", "candidates", &bob]));
    assert_eq!(candidates[0]["id"], alice.as_str());

    kinship(&dir).args(["parent", "add", &bob, &alice]).assert().success();
    kinship(&dir)
        .args(["parent", "candidates", &bob])
        .assert()
        .success()
        .stdout(predicate::str::contains("No one can be added as a parent"));

    kinship(&dir)
        .args(["parent", "remove", &bob, &alice])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed parent"));
    kinship(&dir)
        .args(["parent", "remove", &bob, &alice])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parent relationship not found"));
}

#[test]
fn test_person_delete_requires_force() {
    let dir = TempDir::new().unwrap();
    let alice = add_person(&dir, "Alice", "1960-01-01");

    kinship(&dir)
        .args(["person", "delete", &alice])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force"));

    kinship(&dir)
        .args(["person", "delete", &alice, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted person: Alice"));

    kinship(&dir)
        .args(["person", "get", &alice])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Person not found"));
}

#[test]
fn test_redb_backend() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["--backend", "redb", "person", "add", "Alice", "--born", "1960-01-01"])
        .assert()
        .success();

    let persons = json_output(kinship(&dir).args([
        "--backend",
        "redb",
        "--format",
        "json",
        "person",
        "list",
    ]));
    assert_eq!(persons.as_array().unwrap().len(), 1);
    assert!(dir.path().join("data").join("kinship.redb").exists());
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["config", "set", "server_addr", "0.0.0.0:9000"])
        .assert()
        .success();

    kinship(&dir)
        .args(["config", "get", "server_addr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:9000"));

    kinship(&dir)
        .args(["config", "get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    kinship(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kinship"));
}
