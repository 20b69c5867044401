//! End-to-end tests of the `trading-peripheral` binary.
//!
//! Every invocation points `--config` and `--settings` into a temporary
//! directory so nothing touches the real per-user files.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use support::workspace::Workspace;

fn cli(workspace: &Workspace) -> Command {
    let mut command = Command::cargo_bin("trading-peripheral").expect("binary exists");
    command
        .arg("--color")
        .arg("never")
        .arg("--config")
        .arg(workspace.document())
        .arg("--settings")
        .arg(workspace.settings())
        .env_remove("RUST_LOG");
    command
}

fn json_stdout(command: &mut Command) -> Value {
    let output = command.output().expect("run binary");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn help_lists_commands() {
    let workspace = Workspace::new();
    cli(&workspace)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn show_lists_default_sections_as_json() {
    let workspace = Workspace::new();
    let json = json_stdout(cli(&workspace).args(["--json", "show"]));

    let sections: Vec<&str> = json["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["section"].as_str().unwrap())
        .collect();
    assert_eq!(sections, vec!["General", "Variables", "Order Status", "Actions"]);
}

#[test]
fn show_section_marks_overrides() {
    let workspace = Workspace::new();
    workspace.write_document("[General]\nimplicitly_wait = 9\n");
    let json = json_stdout(cli(&workspace).args(["--json", "show", "General"]));

    let options = json["options"].as_array().unwrap();
    let wait = options
        .iter()
        .find(|row| row["option"] == "implicitly_wait")
        .unwrap();
    assert_eq!(wait["source"], "override");
    assert_eq!(wait["value"], "9");
}

#[test]
fn check_list_reports_overrides() {
    let workspace = Workspace::new();
    workspace.write_document("[General]\nimplicitly_wait = 9\n");
    let json = json_stdout(cli(&workspace).args(["--json", "check", "--list"]));

    let differences = json["differences"].as_array().unwrap();
    assert_eq!(differences.len(), 1);
    assert_eq!(differences[0]["option"], "implicitly_wait");
    assert_eq!(differences[0]["default"], "4");
    assert_eq!(differences[0]["user"], "9");
}

#[test]
fn check_list_table_names_the_override() {
    let workspace = Workspace::new();
    workspace.write_document("[General]\nimplicitly_wait = 9\n");
    cli(&workspace)
        .args(["check", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("implicitly_wait"));
}

#[test]
fn delete_removes_the_override() {
    let workspace = Workspace::new();
    workspace.write_document("[General]\nimplicitly_wait = 9\nheadless = False\n");
    cli(&workspace)
        .args(["delete", "General", "implicitly_wait"])
        .assert()
        .success();

    let text = workspace.read_document();
    assert!(!text.contains("implicitly_wait"), "{text}");
    assert!(text.contains("headless = False"), "{text}");
}

#[test]
fn piped_edit_backs_up_then_rewrites() {
    let workspace = Workspace::new();
    workspace.write_document("[General]\nheadless = False\n");
    cli(&workspace)
        .args(["edit", "General"])
        .write_stdin("\n\nt\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("headless = False"));

    assert_eq!(workspace.backup_count(), 1);
    assert!(workspace.read_document().contains("headless = True"));
}

#[test]
fn non_numeric_limit_answer_exits_with_code_two() {
    let workspace = Workspace::new();
    cli(&workspace)
        .args(["option", "General", "implicitly_wait", "--min", "0", "--max", "10"])
        .write_stdin("m\nabc\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid number 'abc'"));

    assert!(!workspace.document().exists());
}

#[test]
fn limits_clamp_entered_numbers() {
    let workspace = Workspace::new();
    cli(&workspace)
        .args(["option", "General", "implicitly_wait", "--min", "0", "--max", "10"])
        .write_stdin("m\n50\n")
        .assert()
        .success();

    assert!(workspace.read_document().contains("implicitly_wait = 10"));
}

#[test]
fn malformed_document_is_reported() {
    let workspace = Workspace::new();
    workspace.write_document("headless\n");
    cli(&workspace)
        .arg("show")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("option found before any [section] header"));
}

#[test]
fn invalid_settings_exit_before_running() {
    let workspace = Workspace::new();
    workspace.write_settings("[backup]\nnumber_of_backups = 0\n");
    cli(&workspace)
        .arg("show")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("number_of_backups"));
}

#[test]
fn missing_section_argument_is_a_usage_error() {
    let workspace = Workspace::new();
    cli(&workspace).arg("edit").assert().failure();
}
