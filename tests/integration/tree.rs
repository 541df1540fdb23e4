//! `scaffold tree` output.

use crate::common::TestWorkspace;
use predicates::prelude::*;
use scaffold_cli::test_utils::write_project;

#[test]
fn test_tree_text() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["pushmode"]);

    workspace
        .scaffold()
        .args(["tree", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("demo\n└── pushmode 0.25.1\n"))
        .stdout(predicate::str::contains("    └── hookless 0.17.1\n"))
        .stdout(predicate::str::contains("Dependencies:"))
        .stdout(predicate::str::contains("com.machinezoo.pushmode:pushmode:0.25.1 [pushmode]"));

    assert!(!workspace.file("demo/pom.xml").exists());
}

#[test]
fn test_tree_json() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["hookless"]);

    let output = workspace
        .scaffold()
        .args(["tree", "demo/scaffold.toml", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["project"], "demo");
    let artifacts: Vec<&str> = json["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|dependency| dependency["artifact"].as_str().unwrap())
        .collect();
    assert_eq!(artifacts, ["closeablescope", "noexception", "hookless"]);
    assert!(json["links"].as_array().unwrap().contains(&"https://hookless.machinezoo.com/javadoc/".into()));
}

#[test]
fn test_tree_without_project_fails() {
    let workspace = TestWorkspace::new();

    workspace
        .scaffold()
        .arg("tree")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No scaffold.toml"));
}
