//! Integration tests for the keydiff CLI
//!
//! These tests run the actual CLI binary against temporary keybindings
//! directories and verify the report and the override file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get the binary to test
fn keydiff_cmd() -> Command {
    let mut cmd = Command::cargo_bin("keydiff").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("KEYDIFF_DEBUG")
        .env_remove("DEBUG");
    cmd
}

fn write_platform(dir: &Path, id: &str, body: &str) {
    fs::write(dir.join(format!("{id}.keybindings.json")), body).unwrap();
}

/// Windows/Linux/MacOS dumps with one key in each category
fn three_platform_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_platform(
        temp_dir.path(),
        "windows",
        r#"// Overrides this file
[
    { "key": "ctrl+a", "command": "editor.action.selectAll" },
    // Find
    { "key": "ctrl+h", "command": "editor.action.startFindReplaceAction" },
    { "key": "ctrl+shift+k", "command": "editor.action.deleteLines", "when": "textInputFocus" },
    { "key": "escape", "command": "closeFindWidget", "when": "editorFocus" },
    { "key": "f12", "command": "editor.action.revealDefinition" }
]
"#,
    );
    write_platform(
        temp_dir.path(),
        "linux",
        r#"[
    { "key": "ctrl+a", "command": "editor.action.selectAll" },
    { "key": "ctrl+h", "command": "editor.action.startFindReplaceAction" },
    { "key": "ctrl+shift+k", "command": "editor.action.deleteLines", "when": "textInputFocus && !editorReadonly" },
    { "key": "f12", "command": "editor.action.revealDefinition" }
]
"#,
    );
    write_platform(
        temp_dir.path(),
        "macos",
        r#"[
    { "key": "ctrl+a", "command": "editor.action.selectAll" },
    { "key": "ctrl+shift+k", "command": "editor.action.deleteLines", "when": "textInputFocus" },
    { "key": "f12", "command": "editor.action.revealDefinition" }
]
"#,
    );
    temp_dir
}

#[test]
fn test_help_flag() {
    keydiff_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compare editor keybindings"));
}

#[test]
fn test_compare_help() {
    keydiff_cmd()
        .args(["compare", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--reference"))
        .stdout(predicate::str::contains("--no-default-ignores"));
}

// ============================================================================
// Compare
// ============================================================================

#[test]
fn test_compare_three_platforms() {
    let temp_dir = three_platform_dir();
    let output = temp_dir.path().join("overrides.json");

    keydiff_cmd()
        .arg("compare")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--output")
        .arg(&output)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Key 'ctrl+h' is not bound on MacOS; on Windows, it is:",
        ))
        .stdout(predicate::str::contains(
            "Bindings for 'ctrl+shift+k' differ between Windows and Linux:",
        ))
        .stdout(predicate::str::contains("+    \"when\": \"textInputFocus && !editorReadonly\""))
        .stdout(predicate::str::contains("Of the 5 keys bound on Windows:"))
        .stdout(predicate::str::contains("  1 are ignored by the ignore rules:\n    escape\n"))
        .stdout(predicate::str::contains("  0 are not bound on Linux:"))
        .stdout(predicate::str::contains("  2 are the same on all three platforms:"))
        .stdout(predicate::str::contains("MacOS has 3 bound keys."))
        .stdout(predicate::str::contains("Wrote 2 override bindings"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("    [\n      {\n        \"key\": \"ctrl+h\","));
    assert!(written.ends_with("    ]\n"));
    assert!(!written.contains("escape"));
    assert!(!written.contains("ctrl+a"));
}

#[test]
fn test_compare_reference_and_platform_flags() {
    let temp_dir = three_platform_dir();
    let output = temp_dir.path().join("linux-overrides.json");

    keydiff_cmd()
        .arg("compare")
        .arg("--dir")
        .arg(temp_dir.path())
        .args(["--reference", "linux", "--compare", "macos"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Of the 4 keys bound on Linux:"))
        .stdout(predicate::str::contains("are the same on both platforms"))
        .stdout(predicate::str::contains("Windows has").not());

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("ctrl+h"));
    assert!(written.contains("!editorReadonly"));
}

#[test]
fn test_compare_extra_ignore() {
    let temp_dir = three_platform_dir();
    let output = temp_dir.path().join("overrides.json");

    keydiff_cmd()
        .arg("compare")
        .arg("--dir")
        .arg(temp_dir.path())
        .args(["--ignore", "ctrl+h", "--no-default-ignores"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("  1 are ignored by the ignore rules:\n    ctrl+h\n"))
        .stdout(predicate::str::contains("Key 'escape' is not bound on Linux"));
}

#[test]
fn test_compare_reads_config_file() {
    let temp_dir = three_platform_dir();
    let config = temp_dir.path().join("keydiff.yaml");
    let output = temp_dir.path().join("from-config.json");
    fs::write(
        &config,
        format!(
            "dir: {:?}\ncompare: [macos]\noutput: {:?}\n",
            temp_dir.path(),
            output
        ),
    )
    .unwrap();

    keydiff_cmd()
        .arg("compare")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Linux has").not());

    assert!(output.exists());
}

#[test]
fn test_compare_is_reproducible() {
    let temp_dir = three_platform_dir();
    let output = temp_dir.path().join("overrides.json");

    let run = || {
        keydiff_cmd()
            .arg("compare")
            .arg("--dir")
            .arg(temp_dir.path())
            .arg("--output")
            .arg(&output)
            .output()
            .unwrap()
    };

    let first = run();
    let first_file = fs::read(&output).unwrap();
    let second = run();
    let second_file = fs::read(&output).unwrap();

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first_file, second_file);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_platform_file() {
    let temp_dir = three_platform_dir();
    fs::remove_file(temp_dir.path().join("macos.keybindings.json")).unwrap();

    keydiff_cmd()
        .arg("compare")
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEYDIFF-001"))
        .stderr(predicate::str::contains("macos.keybindings.json"));
}

#[test]
fn test_binding_without_key() {
    let temp_dir = three_platform_dir();
    write_platform(temp_dir.path(), "linux", r#"[{ "command": "orphan" }]"#);

    keydiff_cmd()
        .arg("compare")
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Expected binding to have a 'key'"))
        .stderr(predicate::str::contains("orphan"));
}

#[test]
fn test_top_level_not_a_list() {
    let temp_dir = three_platform_dir();
    write_platform(temp_dir.path(), "windows", r#"{ "key": "a" }"#);

    keydiff_cmd()
        .arg("compare")
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("to be a list"));
}

#[test]
fn test_debug_level_prints_cause_chain() {
    let temp_dir = three_platform_dir();
    write_platform(temp_dir.path(), "windows", "[ not json ]");

    keydiff_cmd()
        .env("KEYDIFF_DEBUG", "1")
        .arg("compare")
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEYDIFF-002"))
        .stderr(predicate::str::contains("Caused by:"));
}

#[test]
fn test_invalid_debug_level() {
    keydiff_cmd()
        .env("KEYDIFF_DEBUG", "loud")
        .args(["validate", "whatever.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEYDIFF_DEBUG"));
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn test_validate_files() {
    let temp_dir = three_platform_dir();

    keydiff_cmd()
        .arg("validate")
        .arg(temp_dir.path().join("windows.keybindings.json"))
        .arg(temp_dir.path().join("macos.keybindings.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("5 bindings, 5 keys"))
        .stdout(predicate::str::contains("3 bindings, 3 keys"));
}

#[test]
fn test_validate_requires_files() {
    keydiff_cmd().arg("validate").assert().failure();
}
