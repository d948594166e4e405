//! End-to-end tests running the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

// Use the dev-dependency crate for helpers
use test_helpers::*;

fn prebuild() -> Command {
    let mut cmd = Command::cargo_bin("incubator-prebuild").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "warn")
        .env_remove("PROJECT_DIR");
    cmd
}

#[test]
fn fresh_bootstrap() {
    let project = TestProject::new();

    prebuild()
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Build #1"))
        .stdout(predicate::str::contains("Created default profile file:"))
        .stdout(predicate::str::contains("Created default system settings file:"));

    assert!(project.header().contains("#define BUILD_NUMBER 1"));

    let profiles: Value = serde_json::from_str(&project.read(PROFILES_REL)).unwrap();
    assert_eq!(profiles[0]["name"], "Tavuk");
    assert_eq!(profiles[0]["total_days"], 21);
    assert_eq!(profiles[0]["stages"].as_array().unwrap().len(), 3);

    let system: Value = serde_json::from_str(&project.read(SYSTEM_REL)).unwrap();
    assert_eq!(system["settings"]["target_temp"], 37.8);
}

#[test]
fn second_run_bumps_and_reports_no_seeds() {
    let project = TestProject::new();
    prebuild().arg(project.root()).assert().success();

    prebuild()
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Build #2"))
        .stdout(predicate::str::contains("Created default").not());

    assert_eq!(build_number_in(&project.header()), Some(2));
}

#[test]
fn project_dir_from_environment() {
    let project = TestProject::new();

    prebuild()
        .env("PROJECT_DIR", project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Build #1"));

    assert!(project.exists(HEADER_REL));
}

#[test]
fn custom_settings_survive() {
    let project = TestProject::new();
    project.write(SYSTEM_REL, r#"{"custom": true}"#);

    prebuild()
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default system settings file").not());

    assert_eq!(project.read(SYSTEM_REL), r#"{"custom": true}"#);
}

#[test]
fn corrupted_header_resets_counter() {
    let project = TestProject::new();
    project.write(HEADER_REL, legacy_header("abc"));

    prebuild()
        .arg(project.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Build #1"));
}

#[test]
fn missing_project_dir_is_a_usage_error() {
    prebuild()
        .assert()
        .failure()
        .stderr(predicate::str::contains("PROJECT_DIR"));
}

#[test]
fn stamp_failure_aborts_before_seeding() {
    let project = TestProject::new();
    project.write("src/include", "not a directory");

    prebuild()
        .arg(project.root())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to stamp build info"));

    assert!(!project.exists("data"));
}

#[test]
fn seed_failure_exits_with_three() {
    let project = TestProject::new();
    project.write("data", "not a directory");

    prebuild()
        .arg(project.root())
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Build #1"));
}
