#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CATALOG: &str = r#"
[[supplement]]
id = "creatine"
name = "Kreatin Monohydrat"
category = "performance"
impact_score = 8.0

[[supplement.modifiers]]
when = { goal = "muscle_gain" }
delta = 1.0
label = "Ziel: Muskelaufbau"

[[supplement]]
id = "l-carnitine"
name = "L-Carnitin"
impact_score = 5.0

[[supplement.modifiers]]
when = { goal = "fat_loss" }
delta = 2.0
label = "Ziel: Fettverlust"

[[supplement]]
id = "iron"
name = "Eisen"
impact_score = 3.0

[[supplement.modifiers]]
when = { bloodwork = "low_ferritin" }
delta = 4.0
label = "Ferritin niedrig"
warning = "Eisen nur nach ärztlicher Rücksprache supplementieren"

[[supplement.modifiers]]
when = { protocol = "trt" }
delta = -1.0
label = "TRT: Hämatokrit beachten"
"#;

const CONTEXT: &str = r#"
[profile]
goal = "fat_loss"
age = 41
sex = "male"

[[labs]]
marker = "ferritin"
value = 14.0
ref_low = 30.0
ref_high = 400.0
measured_at = "2026-08-12"
"#;

fn stackscore() -> Command {
    Command::cargo_bin("stackscore").expect("binary should compile")
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("fixture should write");
    path
}

#[test]
fn score_without_context_uses_base_scores() {
    let dir = TempDir::new().expect("temp dir should be created");
    let catalog = write_fixture(dir.path(), "catalog.toml", CATALOG);

    stackscore()
        .arg("score")
        .arg(&catalog)
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Personalized: no"))
        .stdout(predicate::str::contains("## Essential (1)"))
        .stdout(predicate::str::contains("- L-Carnitin `l-carnitine`: 5.0\n"));
}

#[test]
fn score_with_context_personalizes_and_warns() {
    let dir = TempDir::new().expect("temp dir should be created");
    let catalog = write_fixture(dir.path(), "catalog.toml", CATALOG);
    let context = write_fixture(dir.path(), "me.toml", CONTEXT);

    stackscore()
        .arg("score")
        .arg(&catalog)
        .arg("--context")
        .arg(&context)
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Personalized: yes"))
        .stdout(predicate::str::contains("## Optimizer (2)"))
        .stdout(predicate::str::contains(
            "- L-Carnitin `l-carnitine`: 7.0 (base 5.0, +2.0)",
        ))
        .stdout(predicate::str::contains(
            "warning: Eisen nur nach ärztlicher Rücksprache supplementieren",
        ));
}

#[test]
fn score_json_respects_tier_filter() {
    let dir = TempDir::new().expect("temp dir should be created");
    let catalog = write_fixture(dir.path(), "catalog.toml", CATALOG);
    let context = write_fixture(dir.path(), "me.toml", CONTEXT);

    let output = stackscore()
        .arg("score")
        .arg(&catalog)
        .arg("--context")
        .arg(&context)
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "--tier", "optimizer"])
        .output()
        .expect("command should run");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["personalized"], true);
    assert_eq!(value["catalog_digest"].as_str().map(str::len), Some(64));
    assert_eq!(value["tiers"]["essential"].as_array().map(Vec::len), Some(0));
    let optimizer = value["tiers"]["optimizer"]
        .as_array()
        .expect("optimizer tier should be an array");
    assert_eq!(optimizer.len(), 2);
    assert_eq!(optimizer[0]["id"], "iron");
    assert_eq!(optimizer[0]["final_score"], 7.0);
    assert_eq!(optimizer[1]["id"], "l-carnitine");
}

#[test]
fn project_config_changes_tier_thresholds() {
    let dir = TempDir::new().expect("temp dir should be created");
    let catalog = write_fixture(dir.path(), "catalog.toml", CATALOG);
    write_fixture(
        dir.path(),
        "stackscore.toml",
        "[tiers]\nessential = 9.0\noptimizer = 2.0\n",
    );

    stackscore()
        .arg("score")
        .arg(&catalog)
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("## Essential (0)"))
        .stdout(predicate::str::contains("## Optimizer (3)"));
}

#[test]
fn invalid_config_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    let catalog = write_fixture(dir.path(), "catalog.toml", CATALOG);
    write_fixture(
        dir.path(),
        "stackscore.toml",
        "[tiers]\nessential = 4.0\noptimizer = 6.0\n",
    );

    stackscore()
        .arg("score")
        .arg(&catalog)
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("must be greater than"));
}

#[test]
fn explain_shows_grouped_breakdown() {
    let dir = TempDir::new().expect("temp dir should be created");
    let catalog = write_fixture(dir.path(), "catalog.toml", CATALOG);
    let context = write_fixture(dir.path(), "me.toml", CONTEXT);

    stackscore()
        .arg("explain")
        .arg(&catalog)
        .arg("IRON")
        .arg("--context")
        .arg(&context)
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Eisen (`iron`)"))
        .stdout(predicate::str::contains("### bloodwork"))
        .stdout(predicate::str::contains("- [+] Ferritin niedrig: +4.0"))
        .stdout(predicate::str::contains("- final score: 7.0"));
}

#[test]
fn explain_unknown_id_fails() {
    let dir = TempDir::new().expect("temp dir should be created");
    let catalog = write_fixture(dir.path(), "catalog.toml", CATALOG);

    stackscore()
        .arg("explain")
        .arg(&catalog)
        .arg("ashwagandha")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown supplement: ashwagandha"));
}

#[test]
fn lint_clean_catalog_succeeds() {
    let dir = TempDir::new().expect("temp dir should be created");
    let catalog = write_fixture(dir.path(), "catalog.toml", CATALOG);

    stackscore()
        .arg("lint")
        .arg(&catalog)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("lint: no findings (3 supplements)"));
}

#[test]
fn lint_reports_warnings_and_blocking_findings() {
    let dir = TempDir::new().expect("temp dir should be created");
    let warn_only = write_fixture(
        dir.path(),
        "warn.toml",
        "[[supplement]]\nid = \"zinc\"\nname = \"Zink\"\nimpact_score = 11.0\n",
    );
    stackscore()
        .arg("lint")
        .arg(&warn_only)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[WARN] catalog.impact_out_of_range"));

    let blocking = write_fixture(
        dir.path(),
        "blocking.toml",
        r#"
[[supplement]]
id = "zinc"
name = "Zink"
impact_score = 6.0

[[supplement]]
id = "zinc"
name = "Zink 2"
impact_score = 6.0
"#,
    );
    stackscore()
        .arg("lint")
        .arg(&blocking)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[BLOCKING] catalog.duplicate_id"));
}

#[test]
fn context_prints_derived_flags() {
    let dir = TempDir::new().expect("temp dir should be created");
    let context = write_fixture(dir.path(), "me.toml", CONTEXT);

    stackscore()
        .arg("context")
        .arg(&context)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"goal\": \"fat_loss\""))
        .stdout(predicate::str::contains("\"age_bracket\": \"30_44\""))
        .stdout(predicate::str::contains("low_ferritin"));
}
