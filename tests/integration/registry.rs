//! `scaffold registry` and `--registry`.

use crate::common::TestWorkspace;
use predicates::prelude::*;
use scaffold_cli::test_utils::{SAMPLE_REGISTRY, write_project};

#[test]
fn test_builtin_registry_is_valid() {
    let workspace = TestWorkspace::new();

    workspace
        .scaffold()
        .args(["registry", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registry is valid"));
}

#[test]
fn test_list_registry_file() {
    let workspace = TestWorkspace::new();
    let registry = workspace.write("registry.toml", SAMPLE_REGISTRY);

    workspace
        .scaffold()
        .arg("--registry")
        .arg(&registry)
        .args(["registry", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example:web:2.0.0"))
        .stdout(predicate::str::contains("implies: core"))
        .stdout(predicate::str::contains("hookless").not());
}

#[test]
fn test_invalid_registry_reports_problems() {
    let workspace = TestWorkspace::new();
    let registry = workspace.write(
        "registry.toml",
        r#"
[bundles.a]
coordinates = ["g:a:1"]
implies = ["b"]

[bundles.b]
coordinates = ["g:b:1"]
implies = ["a"]
"#,
    );

    workspace
        .scaffold()
        .arg("--registry")
        .arg(&registry)
        .args(["registry", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("problem(s)"));
}

#[test]
fn test_generate_with_registry_file() {
    let workspace = TestWorkspace::new();
    let registry = workspace.write("registry.toml", SAMPLE_REGISTRY);
    write_project(workspace.path(), "demo", &["web", "testing"]);

    workspace.scaffold().arg("--registry").arg(&registry).arg("generate").assert().success();

    let manifest = workspace.read("demo/pom.xml");
    assert!(manifest.contains("<artifactId>web</artifactId>"));
    assert!(manifest.contains("<artifactId>core</artifactId>"));
    assert!(manifest.contains("<scope>test</scope>"));
    assert!(manifest.contains("<link>https://docs.example.com/core/1.0.0/</link>"));
}
