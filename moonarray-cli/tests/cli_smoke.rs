//! Smoke tests for the `moonarray` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("moonarray").unwrap()
}

const DEFAULT_OUTPUT: &str = "Hello World!
Hello Moon!
Original array: [1 2 3 4 5]
Array after adding 5 to each element: [ 6  7  8  9 10]
Mean of the array: 3.0
Reshaped array (5x1):
 [[1]
 [2]
 [3]
 [4]
 [5]]
Result of matrix multiplication:
 [[19 22]
 [43 50]]
";

#[test]
fn default_run_prints_demo() {
    cmd()
        .env("MOONARRAY_LOG", "off")
        .assert()
        .success()
        .stdout(DEFAULT_OUTPUT);
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("moonarray"));
}

#[test]
fn json_report() {
    cmd()
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dtype\": \"int64\""))
        .stdout(predicate::str::contains("\"mean\": 3.0"))
        .stdout(predicate::str::contains("Hello Moon!").not());
}

#[test]
fn print_config_template() {
    cmd()
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"moon_greeting\": \"Hello Moon!\""))
        .stdout(predicate::str::contains("\"reshape\""));
}

#[test]
fn config_file_overrides_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, r#"{{"values": [2, 4, 6, 8], "addend": 0.5, "reshape": [2, -1]}}"#).unwrap();

    cmd()
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Original array: [2 4 6 8]"))
        .stdout(predicate::str::contains(
            "Array after adding 0.5 to each element: [2.5 4.5 6.5 8.5]",
        ))
        .stdout(predicate::str::contains("Mean of the array: 5.0"))
        .stdout(predicate::str::contains("Reshaped array (2x2):\n [[2 4]\n [6 8]]"));
}

#[test]
fn missing_config_file_fails() {
    cmd()
        .args(["--config", "/nonexistent/demo.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn invalid_reshape_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.json");
    std::fs::write(&path, r#"{"reshape": [3, 2]}"#).unwrap();

    cmd()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to reshape"));
}

#[test]
fn empty_values_fail_at_mean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.json");
    std::fs::write(&path, r#"{"values": [], "reshape": [0]}"#).unwrap();

    cmd()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Original array: []"))
        .stderr(predicate::str::contains("Failed to compute the mean"));
}
