use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("bizform");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("bizform"))
        .stdout(contains("--screen"));
}

#[test]
fn lists_screens() {
    let mut cmd = cargo::cargo_bin_cmd!("bizform");
    cmd.arg("--list-screens")
        .assert()
        .success()
        .stdout(contains("customer"))
        .stdout(contains("invoice-item"));
}

#[test]
fn requires_a_screen() {
    let mut cmd = cargo::cargo_bin_cmd!("bizform");
    cmd.assert().failure().stderr(contains("--screen"));
}

#[test]
fn rejects_unknown_screen_before_starting_ui() {
    let mut cmd = cargo::cargo_bin_cmd!("bizform");
    cmd.args(["--screen", "payroll"])
        .assert()
        .failure()
        .stderr(contains("payroll"));
}

#[test]
fn refuses_to_overwrite_existing_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("payload.json");
    std::fs::write(&out, "{}").expect("seed file");
    let mut cmd = cargo::cargo_bin_cmd!("bizform");
    cmd.args(["--screen", "customer", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn reports_broken_state_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let state = dir.path().join("state.json");
    std::fs::write(&state, "{ not json").expect("seed file");
    let mut cmd = cargo::cargo_bin_cmd!("bizform");
    cmd.args(["--screen", "customer", "--state"])
        .arg(&state)
        .assert()
        .failure()
        .stderr(contains("input (state)"));
}
