//! Generator configuration from `--config` and `SCAFFOLD_CONFIG`.

use crate::common::TestWorkspace;
use predicates::prelude::*;
use scaffold_cli::test_utils::write_project;

#[test]
fn test_config_renames_manifest_file() {
    let workspace = TestWorkspace::new();
    let config = workspace.write("scaffold-config.toml", "manifest-file = \"build.xml\"\n");
    write_project(workspace.path(), "demo", &["gson"]);

    workspace.scaffold().arg("--config").arg(&config).arg("generate").assert().success();

    assert!(workspace.file("demo/build.xml").exists());
    assert!(!workspace.file("demo/pom.xml").exists());
}

#[test]
fn test_config_from_environment() {
    let workspace = TestWorkspace::new();
    let config = workspace.write("scaffold-config.toml", "manifest-file = \"build.xml\"\n");
    write_project(workspace.path(), "demo", &["gson"]);

    workspace.scaffold().env("SCAFFOLD_CONFIG", &config).arg("generate").assert().success();

    assert!(workspace.file("demo/build.xml").exists());
}

#[test]
fn test_missing_config_file_fails() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["gson"]);

    workspace
        .scaffold()
        .args(["--config", "does-not-exist.toml", "generate"])
        .assert()
        .failure();

    assert!(!workspace.file("demo/pom.xml").exists());
}

#[test]
fn test_invalid_config_rejected() {
    let workspace = TestWorkspace::new();
    let config = workspace.write("scaffold-config.toml", "unknown-key = 1\n");
    write_project(workspace.path(), "demo", &["gson"]);

    workspace
        .scaffold()
        .arg("--config")
        .arg(&config)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn test_custom_template() {
    let workspace = TestWorkspace::new();
    workspace.write(
        "templates/region.tera",
        "    <!-- {{ project.name }} -->\n{% for dependency in dependencies %}    <dep>{{ dependency.artifact }}</dep>\n{% endfor %}",
    );
    let config = workspace.write("scaffold-config.toml", "template = \"templates/region.tera\"\n");
    write_project(workspace.path(), "demo", &["gson"]);

    workspace.scaffold().arg("--config").arg(&config).arg("generate").assert().success();

    let manifest = workspace.read("demo/pom.xml");
    assert!(manifest.contains("    <!-- demo -->\n    <dep>gson</dep>\n"));
}
