//! Integration tests for the `neko` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn neko() -> Command {
    let mut cmd = Command::cargo_bin("neko").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

fn write_config(dir: &Path, system: &str, version: &str) {
    fs::write(
        dir.join(".neko.json"),
        format!(
            r#"{{
  "projectName": "widget",
  "projectOwner": "acme",
  "projectType": "other",
  "releaseSystem": "{system}",
  "version": "{version}"
}}
"#
        ),
    )
    .unwrap();
}

#[test]
fn test_help_flag() {
    neko()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("--project-dir"));
}

#[test]
fn test_version_flag() {
    neko()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_arguments_is_an_error() {
    neko().assert().code(1);
}

#[test]
fn test_unknown_subcommand_exits_with_one() {
    neko()
        .arg("publish")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_release_help_mentions_advisory() {
    neko()
        .args(["release", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--advisory"))
        .stdout(predicate::str::contains("TYPE"));
}

#[test]
fn test_validate_valid_config() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "goreleaser", "1.2.3");

    neko()
        .arg("-C")
        .arg(temp.path())
        .args(["validate", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"))
        .stdout(predicate::str::contains("goreleaser"))
        .stdout(predicate::str::contains("1.2.3"));
}

#[test]
fn test_no_color_accepts_conventional_values() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "goreleaser", "1.2.3");

    for value in ["1", "true", "yes", "0", ""] {
        neko()
            .env("NO_COLOR", value)
            .arg("-C")
            .arg(temp.path())
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("is valid"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn test_validate_reads_legacy_keys() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".neko.json"),
        r#"{"project-name":"widget","project-type":"frontend","release-system":"release-it","version":"0.4.0"}"#,
    )
    .unwrap();

    neko()
        .arg("-C")
        .arg(temp.path())
        .args(["validate", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("release-it"));
}

#[test]
fn test_validate_without_config() {
    let temp = TempDir::new().unwrap();

    neko()
        .arg("-C")
        .arg(temp.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NEKO_3001"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_validate_unknown_release_system() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "semantic-release", "1.0.0");

    neko()
        .arg("-C")
        .arg(temp.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NEKO_4001"));
}

#[test]
fn test_validate_invalid_version() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "goreleaser", "v1");

    neko()
        .arg("-C")
        .arg(temp.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NEKO_3007"));
}

#[test]
fn test_release_outside_repository_fails() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "goreleaser", "1.0.0");

    neko()
        .arg("-C")
        .arg(temp.path())
        .args(["release", "gigantic"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error [NEKO_"));

    // Nothing was written back.
    let config = fs::read_to_string(temp.path().join(".neko.json")).unwrap();
    assert!(config.contains("\"1.0.0\""));
}

#[test]
fn test_missing_project_dir() {
    let temp = TempDir::new().unwrap();

    neko()
        .arg("-C")
        .arg(temp.path().join("does-not-exist"))
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NEKO_2003"));
}

#[test]
fn test_explicit_settings_file_must_exist() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "goreleaser", "1.0.0");

    neko()
        .arg("-C")
        .arg(temp.path())
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NEKO_3006"));
}

#[test]
fn test_settings_file_relocates_config() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("ci")).unwrap();
    write_config(&temp.path().join("ci"), "jreleaser", "2.0.0");
    fs::write(
        temp.path().join("neko.toml"),
        "[project]\nconfig_file = \"ci/.neko.json\"\n",
    )
    .unwrap();

    neko()
        .arg("-C")
        .arg(temp.path())
        .args(["validate", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jreleaser"));
}

#[test]
fn test_completions_bash() {
    neko()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("neko"));
}

#[test]
fn test_completions_unknown_shell() {
    neko().args(["completions", "tcsh"]).assert().code(1);
}
