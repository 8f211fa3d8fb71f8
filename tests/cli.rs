//! End-to-end tests for the command-line interface

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const TRACE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/wdr_walk.json");

#[test]
fn test_track_text_output() {
    Command::cargo_bin("otbn-consts")
        .unwrap()
        .args(["track", TRACE])
        .assert()
        .success()
        .stdout(predicate::str::contains("{x0=0, x10=4096}"))
        .stdout(predicate::str::contains("{x0=0, x10=4096, x8=4}"))
        .stdout(predicate::str::contains("{x0=0, x10=4096, x8=5}"))
        .stdout(predicate::str::contains("<exit>       {x0=0, x8=5}"));
}

#[test]
fn test_track_json_at_point() {
    let output = Command::cargo_bin("otbn-consts")
        .unwrap()
        .args(["track", TRACE, "--format", "json", "--at", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["index"], 3);
    assert_eq!(reports[0]["insn"], "lw");
    assert_eq!(reports[0]["constants"]["x8"], 5);
    assert_eq!(reports[0]["constants"]["x10"], 4096);
}

#[test]
fn test_track_writes_output_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("constants.txt");

    Command::cargo_bin("otbn-consts")
        .unwrap()
        .args(["track", TRACE, "--at", "4", "-o"])
        .arg(&out)
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("<exit>"));
    assert!(content.contains("x8=5"));
    assert!(!content.contains("x10"));
}

#[test]
fn test_track_rejects_out_of_range_point() {
    Command::cargo_bin("otbn-consts")
        .unwrap()
        .args(["track", TRACE, "--at", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_track_reports_unknown_mnemonic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trace.json");
    fs::write(
        &path,
        r#"{"instructions": [], "program": [{"insn": "bn.add", "op_vals": {}}]}"#,
    )
    .unwrap();

    Command::cargo_bin("otbn-consts")
        .unwrap()
        .arg("track")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown mnemonic `bn.add`"));
}
