use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const VALID_FLOW: &str = "\
appId: com.example.app
tags:
  - smoke
name: \"[ABC-1] - Login\"
onFlowStart:
  - runFlow: ../../common/subflows/setup.yaml
onFlowComplete:
  - runFlow: ../../common/subflows/teardown.yaml
---
- tapOn:
    id: login
";

const INVALID_FLOW: &str = "\
appId: com.example.app
tags:
  - smoke
name: \"[ABC-1] - Login\"
onFlowStart:
  - runFlow: ../../common/subflows/setup.yaml
onFlowComplete:
  - runFlow: ../../common/subflows/teardown.yaml
---
- TapOn: \"\"
";

/// Get the path to the flowlint binary for testing
fn flowlint_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_flowlint"))
}

fn run(args: &[&str]) -> (String, String, i32) {
    let output = flowlint_cmd()
        .args(args)
        .output()
        .expect("Failed to execute flowlint");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = write(temp_dir.path(), "login-test.yaml", VALID_FLOW);

    let (stdout, _, exit_code) = run(&["check", &file]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), "Summary: 1/1 files valid");
}

#[test]
fn test_invalid_file_text_output() {
    let temp_dir = TempDir::new().unwrap();
    let file = write(temp_dir.path(), "login-test.yaml", INVALID_FLOW);

    let (stdout, _, exit_code) = run(&["check", &file]);
    assert_eq!(exit_code, 1);
    assert_eq!(
        stdout.trim(),
        format!(
            "File: {file}\n\
             Flow has 1 error\n  \
             1. E016: command \"TapOn\" has wrong capitalization, should be \"tapOn\" (linha 10)\n\n\
             Summary: 0/1 files valid, 1 failed"
        )
    );
}

#[test]
fn test_exit_zero() {
    let temp_dir = TempDir::new().unwrap();
    let file = write(temp_dir.path(), "login-test.yaml", INVALID_FLOW);

    let (_, _, exit_code) = run(&["check", &file, "--exit-zero"]);
    assert_eq!(exit_code, 0);
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "ok-test.yaml", VALID_FLOW);
    let bad = write(temp_dir.path(), "bad-test.yaml", INVALID_FLOW);

    let dir = temp_dir.path().display().to_string();
    let (stdout, _, exit_code) = run(&["check", &dir, "--output-format", "json"]);
    assert_eq!(exit_code, 1);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");
    assert_eq!(json["summary"]["total_files"], 2);
    assert_eq!(json["summary"]["valid_files"], 1);
    assert_eq!(json["summary"]["invalid_files"], 1);
    assert_eq!(json["summary"]["unreadable_files"], 0);

    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["code"], "E016");
    assert_eq!(errors[0]["line"], 10);
    assert_eq!(errors[0]["filename"], bad.as_str());
}

#[test]
fn test_directory_discovery_filters_by_suffix() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "flows/login-test.yaml", VALID_FLOW);
    write(temp_dir.path(), "flows/nested/logout-test.yaml", VALID_FLOW);
    write(temp_dir.path(), "common/subflows/setup.yaml", "- launchApp\n");
    write(temp_dir.path(), "notes.txt", "not a flow");

    let dir = temp_dir.path().display().to_string();
    let (stdout, _, exit_code) = run(&["check", &dir]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), "Summary: 2/2 files valid");
}

#[test]
fn test_mixed_directory_tally() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a-test.yaml", VALID_FLOW);
    write(temp_dir.path(), "b-test.yaml", INVALID_FLOW);
    write(temp_dir.path(), "c-test.yaml", VALID_FLOW);

    let dir = temp_dir.path().display().to_string();
    let (stdout, _, exit_code) = run(&["check", &dir]);
    assert_eq!(exit_code, 1);
    assert_eq!(stdout.matches("File: ").count(), 1);
    assert!(stdout.trim_end().ends_with("Summary: 2/3 files valid, 1 failed"));
}

#[test]
fn test_custom_suffix() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "login.flow.yaml", INVALID_FLOW);
    write(temp_dir.path(), "login-test.yaml", VALID_FLOW);

    let dir = temp_dir.path().display().to_string();
    let (stdout, _, exit_code) = run(&["check", &dir, "--suffix", ".flow.yaml"]);
    assert_eq!(exit_code, 1);
    assert!(stdout.contains("Summary: 0/1 files valid"));
}

#[test]
fn test_explicit_file_ignores_suffix() {
    let temp_dir = TempDir::new().unwrap();
    let file = write(temp_dir.path(), "scratch.yaml", INVALID_FLOW);

    let (stdout, _, exit_code) = run(&["check", &file]);
    assert_eq!(exit_code, 1);
    assert!(stdout.contains("Summary: 0/1 files valid"));
}

#[test]
fn test_missing_path() {
    let (_, stderr, exit_code) = run(&["check", "/nonexistent/flows"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("Path does not exist: /nonexistent/flows"));
}

#[test]
fn test_empty_directory_warns() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().display().to_string();

    let (stdout, stderr, exit_code) = run(&["check", &dir]);
    assert_eq!(exit_code, 0);
    assert!(stderr.contains("Warning: No files found that end with: -test.yaml"));
    assert_eq!(stdout.trim(), "Summary: 0/0 files valid");
}

#[test]
fn test_commands_listing() {
    let (stdout, _, exit_code) = run(&["commands"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("extendedWaitUntil\n      requires: visible or notVisible"));
    assert!(stdout.contains("platforms:  android, ios, web"));
}

#[test]
fn test_commands_json() {
    let (stdout, _, exit_code) = run(&["commands", "--output-format", "json"]);
    assert_eq!(exit_code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");
    let commands = json["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 30);
    assert_eq!(commands[0]["name"], "assertVisible");
    assert_eq!(json["when"]["platforms"][2], "web");
}

#[test]
fn test_no_subcommand() {
    let (_, stderr, exit_code) = run(&[]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("A subcommand is required"));
}
