//! Integration tests for the `coursesched` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise each subcommand
//! through the actual binary against the JSON fixtures, including stdin input,
//! JSON output, and argument errors.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn catalog_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.json")
}

fn enrollment_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/enrollment.json")
}

fn pinned_enrollment_path() -> &'static str {
    concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/pinned_enrollment.json"
    )
}

fn coursesched() -> Command {
    Command::cargo_bin("coursesched").unwrap()
}

/// Run with `--format json` and parse stdout.
fn json_output(args: &[&str]) -> Value {
    let output = coursesched()
        .arg("--format")
        .arg("json")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

fn ids(results: &Value) -> Vec<String> {
    results
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["course"]["id"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// parse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_prints_slots() {
    coursesched()
        .args(["parse", "MWF 10:00-10:50 AM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday"))
        .stdout(predicate::str::contains("Friday"))
        .stdout(predicate::str::contains("10:00 AM - 10:50 AM"));
}

#[test]
fn parse_marks_derived_end_time() {
    coursesched()
        .args(["parse", "F 1:00 PM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1:00 PM - ~1:50 PM"));
}

#[test]
fn parse_tba_has_no_meeting_times() {
    coursesched()
        .args(["parse", "TBA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no meeting times)"));
}

#[test]
fn parse_json_lists_each_schedule() {
    let json = json_output(&["parse", "MWF 10:00-10:50 AM", "TTh 2:00-3:20 PM"]);

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["slots"].as_array().unwrap().len(), 3);
    assert_eq!(entries[1]["slots"][0]["day"], "Tuesday");
    assert_eq!(entries[1]["slots"][0]["endTime"], "3:20 PM");
}

#[test]
fn parse_requires_a_schedule() {
    coursesched().arg("parse").assert().failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// occupancy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn occupancy_lists_enrolled_cells() {
    coursesched()
        .args(["occupancy", "-e", enrollment_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wednesday"))
        .stdout(predicate::str::contains("CSCI 101"));
}

#[test]
fn occupancy_json_cells_carry_ids_and_course() {
    let json = json_output(&["occupancy", "-e", enrollment_path()]);

    let cells = json.as_array().unwrap();
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0]["id"], "csci-101-Monday-9:00 AM");
    assert_eq!(cells[0]["summary"]["professor"], "Dr. Alvarez");
    assert_eq!(cells[0]["course"]["code"], "CSCI 101");
}

#[test]
fn occupancy_honors_pinned_schedule() {
    let json = json_output(&["occupancy", "-e", pinned_enrollment_path()]);

    let cells = json.as_array().unwrap();
    assert_eq!(cells.len(), 5, "3 for CSCI 101, 2 for the pinned TTh section");
    assert!(cells
        .iter()
        .filter(|c| c["course"]["id"] == "math-225")
        .all(|c| c["startTime"] == "11:00 AM"));
}

#[test]
fn occupancy_reads_stdin() {
    let enrollment = std::fs::read_to_string(enrollment_path()).unwrap();

    coursesched()
        .arg("occupancy")
        .write_stdin(enrollment)
        .assert()
        .success()
        .stdout(predicate::str::contains("CSCI 101"));
}

// ─────────────────────────────────────────────────────────────────────────────
// slot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slot_without_selection_lists_unenrolled_courses() {
    let json = json_output(&["slot", "-c", catalog_path(), "-e", enrollment_path()]);

    assert_eq!(
        ids(&json),
        vec!["csci-102", "math-225", "phys-151", "writ-150"]
    );
    assert!(json
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["conflicts"] == false));
}

#[test]
fn slot_with_selection_tags_conflicts() {
    let json = json_output(&[
        "slot",
        "-c",
        catalog_path(),
        "-e",
        enrollment_path(),
        "--day",
        "Monday",
        "--time",
        "9:00 AM",
    ]);

    assert_eq!(ids(&json), vec!["csci-102", "math-225"]);
    assert_eq!(json[0]["conflicts"], true);
    assert_eq!(json[1]["conflicts"], true);
    assert_eq!(json[1]["matchingSchedule"], "MW 9:00-10:15 AM");
}

#[test]
fn slot_open_day_has_no_conflicts() {
    let json = json_output(&[
        "slot",
        "-c",
        catalog_path(),
        "-e",
        enrollment_path(),
        "--day",
        "Th",
        "--time",
        "09:00am",
    ]);

    assert_eq!(ids(&json), vec!["phys-151"]);
    assert_eq!(json[0]["conflicts"], false);
}

#[test]
fn slot_text_output_marks_conflicts() {
    coursesched()
        .args([
            "slot",
            "-c",
            catalog_path(),
            "-e",
            enrollment_path(),
            "--day",
            "Monday",
            "--time",
            "9:00 AM",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFLICT"))
        .stdout(predicate::str::contains("Data Structures"))
        .stdout(predicate::str::contains("Mechanics").not());
}

#[test]
fn slot_filters_and_sorts() {
    let json = json_output(&[
        "slot",
        "-c",
        catalog_path(),
        "--department",
        "CSCI",
        "--department",
        "MATH",
        "--sort",
        "rating",
    ]);

    assert_eq!(ids(&json), vec!["math-225", "csci-101", "csci-102"]);
}

#[test]
fn slot_search_matches_instructor() {
    let json = json_output(&["slot", "-c", catalog_path(), "--search", "haddad"]);

    assert_eq!(ids(&json), vec!["math-225"]);
}

#[test]
fn slot_reads_catalog_from_stdin() {
    let catalog = std::fs::read_to_string(catalog_path()).unwrap();

    coursesched()
        .args(["slot", "--credits", "2"])
        .write_stdin(catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("WRIT 150"))
        .stdout(predicate::str::contains("CSCI 101").not());
}

#[test]
fn slot_day_requires_time() {
    coursesched()
        .args(["slot", "-c", catalog_path(), "--day", "Monday"])
        .assert()
        .failure();
}

#[test]
fn slot_rejects_invalid_time() {
    coursesched()
        .args([
            "slot",
            "-c",
            catalog_path(),
            "--day",
            "Monday",
            "--time",
            "25:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}

#[test]
fn slot_rejects_weekend_day() {
    coursesched()
        .args([
            "slot",
            "-c",
            catalog_path(),
            "--day",
            "Saturday",
            "--time",
            "9:00 AM",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown day"));
}

#[test]
fn slot_reports_bad_catalog_json() {
    coursesched()
        .arg("slot")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse catalog JSON"));
}

#[test]
fn slot_reports_missing_file() {
    coursesched()
        .args(["slot", "-c", "/nonexistent/catalog.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// credits
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn credits_reports_remaining() {
    coursesched()
        .args([
            "credits",
            "-e",
            pinned_enrollment_path(),
            "--target-credits",
            "16",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enrolled:   8"))
        .stdout(predicate::str::contains("Remaining:  8"));
}

#[test]
fn credits_json_goes_negative_over_target() {
    let json = json_output(&[
        "credits",
        "-e",
        pinned_enrollment_path(),
        "--target-credits",
        "6",
    ]);

    assert_eq!(json["enrolled"], 8);
    assert_eq!(json["remaining"], -2);
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_subcommand_shows_usage() {
    coursesched()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    coursesched()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("coursesched"));
}
