//! CLI surface: usage errors and help

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn malformed_date_argument_is_fatal() {
    let mut cmd = Command::cargo_bin("rideup").unwrap();
    cmd.arg("not-a-date")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-date"));
}

#[test]
fn impossible_calendar_date_is_fatal() {
    let mut cmd = Command::cargo_bin("rideup").unwrap();
    cmd.arg("2023-02-29")
        .assert()
        .failure()
        .stderr(predicate::str::contains("2023-02-29"));
}

#[test]
fn one_bad_date_aborts_even_with_good_ones() {
    let mut cmd = Command::cargo_bin("rideup").unwrap();
    cmd.args(["2024-01-01", "2024-99-99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2024-99-99"));
}

#[test]
fn help_lists_the_subcommands() {
    let mut cmd = Command::cargo_bin("rideup").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("auth"));
}

#[test]
fn config_path_prints_a_toml_path() {
    let mut cmd = Command::cargo_bin("rideup").unwrap();
    cmd.args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
