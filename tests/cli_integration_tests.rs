// End-to-end checks of the agency-unison binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("agency-unison").unwrap();
    cmd.env("RUST_LOG", "error");
    cmd
}

#[test]
fn test_no_subcommand_shows_usage() {
    cli()
        .assert()
        .success()
        .stdout(predicate::str::contains("agency-unison login --email"))
        .stdout(predicate::str::contains("admin@agencyunison.com"));
}

#[test]
fn test_whoami_starts_as_admin() {
    cli()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin User <admin@agencyunison.com>"))
        .stdout(predicate::str::contains("(privileged)"));
}

#[test]
fn test_users_lists_roster() {
    cli()
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("Users (4)"))
        .stdout(predicate::str::contains("sarah@agencyunison.com"));
}

#[test]
fn test_login_by_email() {
    cli()
        .args(["login", "--email", "sarah@agencyunison.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome back, Sarah Team"))
        .stdout(predicate::str::contains("Role: user"));
}

#[test]
fn test_login_unknown_email_fails() {
    cli()
        .args(["login", "--email", "ghost@agencyunison.com"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid email or password"));
}

#[test]
fn test_login_by_provider_json() {
    let output = cli()
        .args(["--json", "login", "--provider", "gmail"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["current_user"]["email"], "mike@agencyunison.com");
    assert_eq!(value["privileged"], false);
    assert_eq!(value["active_agency"]["id"], "2");
}

#[test]
fn test_signup_duplicate_email_fails() {
    cli()
        .args([
            "signup",
            "--name",
            "Dup",
            "--email",
            "john@agencyunison.com",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Email already in use"));
}

#[test]
fn test_signup_creates_next_id() {
    let output = cli()
        .args([
            "--json",
            "signup",
            "--name",
            "New Hire",
            "--email",
            "new@agencyunison.com",
            "--role",
            "cofounder",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["current_user"]["id"], "5");
    assert_eq!(value["privileged"], true);
}

#[test]
fn test_invalid_role_is_rejected_by_parser() {
    cli()
        .args(["signup", "--name", "X", "--email", "x@y.com", "--role", "owner"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown role"));
}

#[test]
fn test_switch_agency() {
    cli()
        .args(["switch-agency", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active agency: Pixel Forge Studio"));
}

#[test]
fn test_panels_for_admin_include_user_management() {
    cli()
        .arg("panels")
        .assert()
        .success()
        .stdout(predicate::str::contains("User Management"))
        .stdout(predicate::str::contains("Agency switcher"));
}

#[test]
fn test_replay_script() {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    write!(
        script,
        r#"[
            {{"action": "login", "email": "john@agencyunison.com"}},
            {{"action": "signup", "name": "New", "email": "john@agencyunison.com", "role": "user"}},
            {{"action": "signup", "name": "New", "email": "n@agencyunison.com", "role": "user"}},
            {{"action": "update_profile", "name": "Newer"}}
        ]"#
    )
    .unwrap();

    let output = cli()
        .args(["--json", "replay"])
        .arg(script.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = value["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[1]["ok"], false);
    assert_eq!(value["session"]["current_user"]["name"], "Newer");
    assert_eq!(value["session"]["current_user"]["id"], "5");
}

#[test]
fn test_config_file_can_start_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agency-unison.toml");
    std::fs::write(&path, "[session]\nstart_authenticated = false\n").unwrap();

    cli()
        .arg("--config")
        .arg(&path)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}
