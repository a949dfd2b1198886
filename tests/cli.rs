use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_workflow_commands() {
    Command::cargo_bin("fmsdesk")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("request"))
        .stdout(predicate::str::contains("approve"))
        .stdout(predicate::str::contains("pay"))
        .stdout(predicate::str::contains("tally"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn submit_requires_amount() {
    Command::cargo_bin("fmsdesk")
        .unwrap()
        .args([
            "request", "submit", "--unique-no", "REQ-001", "--unit", "Finance", "--pay-to",
            "Vendor A",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--amount"));
}

#[test]
fn tally_post_rejects_rows_combined_with_all() {
    Command::cargo_bin("fmsdesk")
        .unwrap()
        .args(["tally", "post", "7", "9", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn unconfigured_home_exits_with_settings_error() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("fmsdesk")
        .unwrap()
        .env("HOME", dir.path())
        .args(["tally", "post", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
