//! CLI integration tests driving the `sf` binary end to end.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn sf() -> Command {
    Command::cargo_bin("sf").unwrap()
}

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const CHAIN_DEPS: &str = r#"{
    "app": { "mustDeps": [ { "block": "lib" } ] },
    "lib": { "mustDeps": [ { "block": "base" } ] }
}"#;

#[test]
fn orders_stems_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let deps = write_file(&dir, "deps.json", CHAIN_DEPS);
    let present = write_file(&dir, "stems.txt", "app\nlib\nbase\n");

    sf().args(["order", "--deps"])
        .arg(&deps)
        .arg("--present")
        .arg(&present)
        .assert()
        .success()
        .stdout("base\nlib\napp\n");
}

#[test]
fn orders_positional_stems_with_implicit_ancestors() {
    // No declaration files at all; the naming convention alone orders the
    // base before its compound descendant.
    sf().args(["order", "button__icon", "button"])
        .assert()
        .success()
        .stdout("button\nbutton__icon\n");
}

#[test]
fn independent_stems_follow_the_weight_tie_break() {
    sf().args(["order", "zeta", "alpha"])
        .assert()
        .success()
        .stdout("alpha\nzeta\n");
}

#[test]
fn json_output_is_an_array() {
    let dir = tempfile::tempdir().unwrap();
    let deps = write_file(&dir, "deps.json", CHAIN_DEPS);
    let present = write_file(&dir, "stems.txt", "app\nlib\nbase\n");

    sf().args(["order", "--json", "--deps"])
        .arg(&deps)
        .arg("--present")
        .arg(&present)
        .assert()
        .success()
        .stdout("[\"base\",\"lib\",\"app\"]\n");
}

#[test]
fn reach_strategy_is_selectable() {
    let dir = tempfile::tempdir().unwrap();
    let deps = write_file(&dir, "deps.json", CHAIN_DEPS);
    let present = write_file(&dir, "stems.txt", "app\nlib\nbase\n");

    sf().args(["order", "--strategy", "reach", "--deps"])
        .arg(&deps)
        .arg("--present")
        .arg(&present)
        .assert()
        .success()
        .stdout("base\nlib\napp\n");
}

#[test]
fn present_file_ignores_comments_and_blanks() {
    let dir = tempfile::tempdir().unwrap();
    let present = write_file(&dir, "stems.txt", "# artifacts\n\nb\na\n");

    sf().arg("order")
        .arg("--present")
        .arg(&present)
        .assert()
        .success()
        .stdout("a\nb\n");
}

#[test]
fn dependency_cycle_fails_with_the_offending_path() {
    let dir = tempfile::tempdir().unwrap();
    let deps = write_file(
        &dir,
        "deps.json",
        r#"{
            "a": { "mustDeps": [ { "block": "b" } ] },
            "b": { "mustDeps": [ { "block": "a" } ] }
        }"#,
    );

    sf().args(["order", "a", "b", "--deps"])
        .arg(&deps)
        .assert()
        .failure()
        .stderr(predicate::str::contains("dependency cycle"));
}

#[test]
fn malformed_stem_fails_before_any_output() {
    sf().args(["order", "broken__", "ok"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("invalid stem naming"));
}

#[test]
fn missing_present_input_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();

    sf().arg("order")
        .arg("--cwd")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no present stems"));
}

#[test]
fn unknown_strategy_is_rejected() {
    sf().args(["order", "a", "--strategy", "alphabetical"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown ordering strategy"));
}

#[test]
fn inspect_shows_facets_and_ancestors() {
    sf().args(["inspect", "button__icon_size_large"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("base:      button")
                .and(predicate::str::contains("sub:       icon"))
                .and(predicate::str::contains("size = large"))
                .and(predicate::str::contains("button__icon_size"))
                .and(predicate::str::contains("ancestors:")),
        );
}

#[test]
fn inspect_json_carries_the_record() {
    sf().args(["inspect", "--json", "menu_theme_dark"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"base\": \"menu\"")
                .and(predicate::str::contains("\"entity_only\": false")),
        );
}

#[test]
fn inspect_rejects_malformed_stems() {
    sf().args(["inspect", "a___b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed stem identifier"));
}

#[test]
fn deps_shows_declared_and_implicit_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    let deps = write_file(
        &dir,
        "deps.json",
        r#"{ "menu__item": { "mustDeps": [ { "block": "icon" } ] } }"#,
    );

    sf().args(["deps", "menu__item", "--deps"])
        .arg(&deps)
        .assert()
        .success()
        .stdout("icon\nmenu\n");
}

#[test]
fn project_config_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir, "deps.json", CHAIN_DEPS);
    write_file(&dir, "stems.txt", "app\nlib\nbase\n");
    write_file(
        &dir,
        "stemflow.toml",
        "deps = [\"deps.json\"]\npresent = \"stems.txt\"\n",
    );

    sf().arg("order")
        .arg("--cwd")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("base\nlib\napp\n");
}

#[test]
fn completion_generates_a_script() {
    sf().args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}
