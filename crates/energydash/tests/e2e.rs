//! End-to-end CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURE: &str = "\
Algorithm,Input_Size,Energy_Consumption
Bubble Sort,Small,5
Bubble Sort,Small,6
Bubble Sort,Small,7
Bubble Sort,Small,8
Bubble Sort,Small,9
Quick Sort,Small,3
Quick Sort,Small,4
Quick Sort,Small,5
Quick Sort,Small,2
Quick Sort,Small,6
Merge Sort,Small,8
Merge Sort,Small,7
Merge Sort,Small,9
Merge Sort,Small,6
Merge Sort,Small,10
Bubble Sort,Large,50
Bubble Sort,Large,52
Quick Sort,Large,20
Quick Sort,Large,21
";

const TEXTBOOK_CONCLUSION: &str =
    "F-Statistic: 8.67, Critical Value: 3.89. Decision: Reject the null hypothesis.";

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("energy.csv");
    std::fs::write(&path, FIXTURE).unwrap();
    (dir, path)
}

fn bundled_dataset() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/energy_consumption.csv")
}

fn energydash() -> Command {
    let mut cmd = Command::cargo_bin("energydash").expect("binary not found");
    cmd.env("NO_COLOR", "1")
        .env_remove("ENERGYDASH_DATA")
        .env_remove("ENERGYDASH_INPUT_SIZE")
        .env_remove("ENERGYDASH_PORT")
        .env_remove("ENERGYDASH_HOST");
    cmd
}

#[test]
fn help_flag() {
    energydash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ANOVA"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn version_flag() {
    energydash()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("energydash"));
}

#[test]
fn report_all_sizes() {
    let (_dir, path) = fixture();
    energydash()
        .arg("report")
        .arg("--data")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Records: 19"))
        .stdout(predicate::str::contains("Energy Consumption for Input Size: Small"))
        .stdout(predicate::str::contains("Energy Consumption for Input Size: Large"))
        .stdout(predicate::str::contains("P-Value: 0.0047"))
        .stdout(predicate::str::contains(TEXTBOOK_CONCLUSION))
        .stdout(predicate::str::contains("Source of Variation"));
}

#[test]
fn report_single_size_quiet() {
    let (_dir, path) = fixture();
    let output = energydash()
        .args(["report", "--input-size", "Small", "-q", "--data"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end(), TEXTBOOK_CONCLUSION);
}

#[test]
fn report_data_from_env() {
    let (_dir, path) = fixture();
    energydash()
        .env("ENERGYDASH_DATA", &path)
        .args(["report", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains(TEXTBOOK_CONCLUSION));
}

#[test]
fn report_json_lines() {
    let (_dir, path) = fixture();
    let output = energydash()
        .args(["report", "--json", "--data"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    // dataset, then graph + anova per size
    assert_eq!(records.len(), 5);
    assert_eq!(records[0]["kind"], "dataset");
    assert_eq!(records[0]["input_sizes"], serde_json::json!(["Small", "Large"]));
    assert_eq!(records[1]["kind"], "graph");
    assert_eq!(records[2]["kind"], "anova");
    assert_eq!(records[2]["conclusion"], TEXTBOOK_CONCLUSION);
    assert_eq!(records[4]["table"][1]["df"], 2);
}

#[test]
fn report_unknown_size_is_config_error() {
    let (_dir, path) = fixture();
    energydash()
        .args(["report", "--input-size", "Huge", "--data"])
        .arg(&path)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("input size 'Huge' not found"));
}

#[test]
fn missing_dataset_is_config_error() {
    energydash()
        .args(["report", "--data", "/definitely/not/here.csv"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("failed to load dataset"));
}

#[test]
fn malformed_dataset_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "Algorithm,Energy_Consumption\nA,1.0\n").unwrap();
    energydash()
        .arg("report")
        .arg("--data")
        .arg(&path)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("missing required column: Input_Size"));
}

#[test]
fn anova_textbook_groups() {
    energydash()
        .args([
            "anova",
            "--group",
            "5,6,7,8,9",
            "--group",
            "3,4,5,2,6",
            "--group",
            "8,7,9,6,10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Between Groups"))
        .stdout(predicate::str::contains("43.3333"))
        .stdout(predicate::str::contains(TEXTBOOK_CONCLUSION));
}

#[test]
fn anova_json() {
    let output = energydash()
        .args(["anova", "--json", "-g", "1,2", "-g", "3,4"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(String::from_utf8(output.stdout).unwrap().trim()).unwrap();
    assert_eq!(json["kind"], "anova");
    assert_eq!(json["table"][0]["f"], 8.0);
}

#[test]
fn anova_invalid_values() {
    energydash()
        .args(["anova", "-g", "1,2", "-g", "x,y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please enter valid numeric values."));
}

#[test]
fn anova_single_group() {
    energydash()
        .args(["anova", "-g", "1,2,3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least two groups"));
}

#[test]
fn anova_too_many_groups() {
    energydash()
        .args(["anova", "-g", "1", "-g", "2", "-g", "3", "-g", "4"])
        .assert()
        .code(4);
}

#[test]
fn invalid_listen_address() {
    let (_dir, path) = fixture();
    energydash()
        .args(["serve", "--host", "not a host", "--data"])
        .arg(&path)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("invalid listen address"));
}

#[test]
fn completion_bash() {
    energydash()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("energydash"));
}

#[test]
fn bundled_dataset_report() {
    energydash()
        .args(["report", "--input-size", "Large", "--data"])
        .arg(bundled_dataset())
        .assert()
        .success()
        .stdout(predicate::str::contains("Records: 90"))
        .stdout(predicate::str::contains("Heap Sort"))
        .stdout(predicate::str::contains("Decision: Reject the null hypothesis."));
}
