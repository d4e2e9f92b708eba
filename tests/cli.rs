use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn cli_version() {
    Command::cargo_bin("jobpool")
        .unwrap()
        .args(["-V"])
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_runs_all_jobs() {
    Command::cargo_bin("jobpool")
        .unwrap()
        .args(["--threads", "3", "--jobs", "12", "--sleep-ms", "1"])
        .assert()
        .success()
        .stdout(contains("completed 12 jobs on 3 threads"))
        .stdout(contains("serial estimate 12 ms"));
}

#[test]
fn cli_zero_threads_fails() {
    Command::cargo_bin("jobpool")
        .unwrap()
        .args(["--threads", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid pool size: 0"));
}

#[test]
fn cli_invalid_argument() {
    Command::cargo_bin("jobpool")
        .unwrap()
        .args(["--jobs", "many"])
        .assert()
        .failure();
}
