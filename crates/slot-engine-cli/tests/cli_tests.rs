//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the generate,
//! days and summary subcommands through the actual binary, including stdin
//! input, fixture files, JSON output and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the availability.json fixture.
fn availability_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/availability.json")
}

/// Helper: path to the bookings.json fixture.
fn bookings_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bookings.json")
}

fn availability_json() -> String {
    std::fs::read_to_string(availability_path()).expect("availability.json fixture must exist")
}

// ─────────────────────────────────────────────────────────────────────────────
// generate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn generate_future_date_lists_all_slots() {
    // 2026-03-16 is a Monday; "now" is two weeks earlier.
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "-a",
            availability_path(),
            "--date",
            "2026-03-16",
            "--duration",
            "30",
            "--now",
            "2026-03-02T12:00:00Z",
            "--format",
            "24h",
        ])
        .output()
        .expect("generate should run");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "09:00");
    assert_eq!(lines[15], "16:30");
}

#[test]
fn generate_reads_availability_from_stdin() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["generate", "--date", "2026-03-22", "--now", "2026-03-02T12:00:00Z"])
        .write_stdin(availability_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("10:00 am"))
        .stdout(predicate::str::contains("10:45 am"))
        .stdout(predicate::str::contains("11:00 am").not());
}

#[test]
fn generate_same_day_applies_buffer() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "-a",
            availability_path(),
            "--date",
            "2026-03-16",
            "--duration",
            "30",
            "--now",
            "2026-03-16T09:10:00Z",
            "--format",
            "24h",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("09:30\n"));
}

#[test]
fn generate_subtracts_bookings() {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "-a",
            availability_path(),
            "-b",
            bookings_path(),
            "--date",
            "2026-03-16",
            "--duration",
            "30",
            "--now",
            "2026-03-02T12:00:00Z",
            "--format",
            "24h",
        ])
        .output()
        .expect("generate should run");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 15);
    assert!(!lines.contains(&"10:00"));
    assert!(lines.contains(&"09:30"));
    assert!(lines.contains(&"10:30"));
    // The cancelled 11:00 booking does not block.
    assert!(lines.contains(&"11:00"));
}

#[test]
fn generate_json_reports_skipped_bookings() {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "-a",
            availability_path(),
            "-b",
            bookings_path(),
            "--date",
            "2026-03-16",
            "--duration",
            "30",
            "--now",
            "2026-03-02T12:00:00Z",
            "--json",
        ])
        .output()
        .expect("generate should run");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["timezone"], "UTC");
    assert_eq!(value["slots"].as_array().unwrap().len(), 15);
    assert_eq!(value["skipped_bookings"].as_array().unwrap().len(), 1);
    assert_eq!(value["skipped_bookings"][0]["reason"], "invalid_time");
    assert!(value["skipped_intervals"].as_array().unwrap().is_empty());
}

#[test]
fn generate_day_without_availability() {
    // 2026-03-21 is a Saturday.
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "-a",
            availability_path(),
            "--date",
            "2026-03-21",
            "--now",
            "2026-03-02T12:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No available time slots"));
}

#[test]
fn generate_with_timezone_override() {
    // 09:00 in Tokyo on 2026-03-16 is 00:00 UTC.
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "-a",
            availability_path(),
            "--date",
            "2026-03-16",
            "--duration",
            "60",
            "--now",
            "2026-03-02T12:00:00Z",
            "--timezone",
            "Asia/Tokyo",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-16T00:00:00Z"));
}

#[test]
fn generate_with_huge_duration_lists_nothing() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "-a",
            availability_path(),
            "-b",
            bookings_path(),
            "--date",
            "2026-03-16",
            "--duration",
            "9999999999999999",
            "--now",
            "2026-03-02T12:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No available time slots"));
}

#[test]
fn generate_invalid_date_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["generate", "-a", availability_path(), "--date", "16/03/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --date"));
}

#[test]
fn generate_invalid_timezone_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "generate",
            "-a",
            availability_path(),
            "--date",
            "2026-03-16",
            "--timezone",
            "Mars/Olympus",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time zone"));
}

#[test]
fn generate_invalid_json_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["generate", "--date", "2026-03-16"])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse availability JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// days / summary
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn days_lists_native_weekdays() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["days", "-a", availability_path()])
        .assert()
        .success()
        .stdout("1 Mon\n2 Tue\n3 Wed\n0 Sun\n");
}

#[test]
fn days_without_intervals_says_so() {
    Command::cargo_bin("slots")
        .unwrap()
        .arg("days")
        .write_stdin(r#"{"name": "Empty", "timezone": "UTC", "intervals": []}"#)
        .assert()
        .success()
        .stdout("No days with availability\n");
}

#[test]
fn summary_describes_each_group() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["summary", "-a", availability_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon: 9:00 AM - 5:00 PM"))
        .stdout(predicate::str::contains("Tue: 9:00 AM - 12:00 PM"))
        .stdout(predicate::str::contains("Sun: 10:00 AM - 11:00 AM"));
}

// ─────────────────────────────────────────────────────────────────────────────
// CLI surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("slots")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .arg("bogus")
        .assert()
        .failure();
}
