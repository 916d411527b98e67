// Integration tests for the stackscore CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and argument handling.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the stackscore binary.
fn stackscore() -> Command {
    Command::cargo_bin("stackscore").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    stackscore()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackscore"));
}

#[test]
fn cli_help_flag() {
    stackscore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("supplement relevance"));
}

#[test]
fn score_requires_catalog() {
    stackscore()
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn explain_requires_id() {
    stackscore()
        .args(["explain", "catalog.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    stackscore()
        .args(["-q", "-v", "lint", "catalog.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_catalog_is_runtime_failure() {
    stackscore()
        .args(["lint", "/nonexistent/catalog.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}
