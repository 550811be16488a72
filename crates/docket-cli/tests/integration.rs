//! Integration tests for the docket CLI.
//!
//! These tests verify the CLI commands work correctly end-to-end.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn docket() -> Command {
    Command::cargo_bin("docket").expect("Failed to find docket binary")
}

/// Helper to build a small `.rst` tree with a nested directory.
fn setup_rst_tree() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("b.rst"), "b\n").unwrap();
    fs::write(temp.path().join("a.rst"), "a\n").unwrap();
    fs::write(temp.path().join("notes.txt"), "ignored\n").unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join("sub").join("c.rst"), "c\n").unwrap();
    temp
}

/// Write a config file pointing the client at `api_url`.
fn write_config(dir: &Path, api_url: &str) -> std::path::PathBuf {
    let config = dir.join("docket.toml");
    fs::write(
        &config,
        format!(
            "[github]\ntoken = \"test-token\"\nrepo = \"octo/demo\"\napi_url = \"{api_url}\"\n\n[export]\noutput_dir = \"{}\"\n",
            dir.join("notes").display()
        ),
    )
    .unwrap();
    config
}

// ============================================================================
// General
// ============================================================================

#[test]
fn test_version() {
    docket()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docket"));
}

#[test]
fn test_help() {
    docket()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("merge"));
}

#[test]
fn test_no_subcommand_fails() {
    docket()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_completions_bash() {
    docket()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docket"));
}

#[test]
fn test_malformed_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("docket.toml");
    fs::write(&config, "[github\nrepo = ").unwrap();

    docket()
        .current_dir(&temp)
        .args(["--config", config.to_str().unwrap(), "merge", ".", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_breadth_first() {
    let input = setup_rst_tree();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("out");

    docket()
        .current_dir(&output)
        .args([
            "merge",
            input.path().to_str().unwrap(),
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged file path:"))
        .stdout(predicate::str::contains("The merge was successful!"));

    let merged = fs::read_to_string(out_dir.join("merged.rst")).unwrap();
    assert_eq!(merged, "a\nb\nc\n");
}

#[test]
fn test_merge_json() {
    let input = setup_rst_tree();
    let output = TempDir::new().unwrap();

    let assert = docket()
        .current_dir(&output)
        .args([
            "merge",
            input.path().to_str().unwrap(),
            output.path().to_str().unwrap(),
            "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["consistent"], true);
    assert_eq!(json["expected_bytes"], 6);
    assert_eq!(json["actual_bytes"], 6);
    assert_eq!(json["files"].as_array().unwrap().len(), 3);
}

#[test]
fn test_merge_custom_extension() {
    let input = setup_rst_tree();
    let output = TempDir::new().unwrap();

    docket()
        .current_dir(&output)
        .args([
            "merge",
            input.path().to_str().unwrap(),
            output.path().to_str().unwrap(),
            "--extension",
            "txt",
        ])
        .assert()
        .success();

    let merged = fs::read_to_string(output.path().join("merged.txt")).unwrap();
    assert_eq!(merged, "ignored\n");
}

#[test]
fn test_merge_missing_input_fails() {
    let output = TempDir::new().unwrap();

    docket()
        .current_dir(&output)
        .args(["merge", "does-not-exist", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to collect files"));

    assert!(!output.path().join("out").exists());
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_without_repo_fails() {
    let temp = TempDir::new().unwrap();

    docket()
        .current_dir(&temp)
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No repository given"));
}

#[test]
fn test_export_invalid_state_rejected() {
    docket()
        .args(["export", "--repo", "octo/demo", "--state", "merged"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_export_malformed_repo_fails() {
    let temp = TempDir::new().unwrap();

    docket()
        .current_dir(&temp)
        .args(["export", "--repo", "no-slash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected owner/name"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_writes_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo/issues"))
        .and(query_param("state", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "number": 1,
                "title": "App crash on start",
                "body": null,
                "state": "open",
                "user": { "login": "octocat" },
                "created_at": "2024-03-01T09:30:00Z",
                "comments": 1
            },
            {
                "number": 2,
                "title": "UI typo",
                "body": "wrong label",
                "state": "open",
                "user": { "login": "octocat" },
                "created_at": "2024-03-01T09:30:00Z",
                "comments": 0
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo/issues/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "user": { "login": "alice" },
                "body": "same here",
                "created_at": "2024-03-02T10:00:00Z"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());
    let report = temp.path().join("report.md");

    let mut cmd = docket();
    cmd.current_dir(&temp).args([
        "--config",
        config.to_str().unwrap(),
        "export",
        "-k",
        "crash",
        "-o",
        report.to_str().unwrap(),
    ]);
    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();
    assert
        .success()
        .stdout(predicate::str::contains(
            "1 issues and their comments have been saved to",
        ));

    let content = fs::read_to_string(&report).unwrap();
    assert!(content.starts_with("# GitHub Issues\n\n## State: open\n\n## Keywords: crash\n\n"));
    assert!(content.contains("## Issue #1: App crash on start"));
    assert!(content.contains("No description provided."));
    assert!(content.contains("#### alice commented at 2024-03-02 10:00:00+00:00:"));
    assert!(!content.contains("UI typo"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_default_path_under_output_dir() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());

    let mut cmd = docket();
    cmd.current_dir(&temp)
        .args(["--config", config.to_str().unwrap(), "export", "--json"]);
    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();
    let output = assert.success().get_output().stdout.clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["issues"], 0);
    assert_eq!(json["repo"], "octo/demo");

    let written = Path::new(json["path"].as_str().unwrap());
    assert!(written.starts_with(temp.path().join("notes")));
    let name = written.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("demo_"));
    assert!(name.ends_with(".md"));
    assert_eq!(
        fs::read_to_string(written).unwrap(),
        "# GitHub Issues\n\n## State: open\n\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_missing_repository_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo/issues"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Not Found" })),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri());

    let mut cmd = docket();
    cmd.current_dir(&temp)
        .args(["--config", config.to_str().unwrap(), "export"]);
    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();
    assert
        .failure()
        .stderr(predicate::str::contains("repository not found"));

    assert!(!temp.path().join("notes").exists());
}
