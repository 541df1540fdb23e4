//! `scaffold check` never writes and fails on stale manifests.

use crate::common::TestWorkspace;
use predicates::prelude::*;
use scaffold_cli::test_utils::write_project;

#[test]
fn test_check_reports_missing_without_writing() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["gson"]);

    workspace
        .scaffold()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing"))
        .stderr(predicate::str::contains("out of date"));

    assert!(!workspace.file("demo/pom.xml").exists());
}

#[test]
fn test_check_passes_after_generate() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["gson"]);
    workspace.scaffold().arg("generate").assert().success();

    workspace
        .scaffold()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All 1 manifest(s) are up to date"));
}

#[test]
fn test_check_detects_stale_region() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["gson"]);
    workspace.scaffold().arg("generate").assert().success();

    write_project(workspace.path(), "demo", &["gson", "streamex"]);
    let before = workspace.read("demo/pom.xml");

    workspace
        .scaffold()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("stale"));

    assert_eq!(workspace.read("demo/pom.xml"), before);
}
