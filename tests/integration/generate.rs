//! `scaffold generate` end to end.

use crate::common::TestWorkspace;
use predicates::prelude::*;
use scaffold_cli::test_utils::{ProjectFixture, write_project};

const BEGIN: &str = "<!-- scaffold:begin generated -->";
const END: &str = "<!-- scaffold:end generated -->";

fn position(haystack: &str, needle: &str) -> usize {
    haystack.find(needle).unwrap_or_else(|| panic!("'{needle}' not found in:\n{haystack}"))
}

#[test]
fn test_generate_creates_then_reports_unchanged() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["hookless"]);

    workspace
        .scaffold()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("created"))
        .stdout(predicate::str::contains("1 created, 0 updated, 0 unchanged, 0 failed"));

    let manifest = workspace.read("demo/pom.xml");
    assert!(manifest.starts_with("<?xml"));
    assert!(manifest.contains(BEGIN));
    assert!(manifest.contains(END));
    assert!(manifest.contains("<artifactId>demo</artifactId>"));
    assert!(manifest.contains("<groupId>com.machinezoo.demo</groupId>"));
    assert!(manifest.contains("<link>https://hookless.machinezoo.com/javadoc/</link>"));

    workspace
        .scaffold()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 created, 0 updated, 1 unchanged, 0 failed"));

    assert_eq!(workspace.read("demo/pom.xml"), manifest);
}

#[test]
fn test_generate_orders_implied_bundles_first() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["hookless", "pushmode"]);

    workspace.scaffold().arg("generate").assert().success();

    let manifest = workspace.read("demo/pom.xml");
    let closeablescope = position(&manifest, "<artifactId>closeablescope</artifactId>");
    let noexception = position(&manifest, "<artifactId>noexception</artifactId>");
    let hookless = position(&manifest, "<artifactId>hookless</artifactId>");
    let pushmode = position(&manifest, "<artifactId>pushmode</artifactId>");
    assert!(closeablescope < noexception);
    assert!(noexception < hookless);
    assert!(hookless < pushmode);
    assert_eq!(manifest.matches("<artifactId>hookless</artifactId>").count(), 1);
}

#[test]
fn test_generate_preserves_manual_content() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["gson"]);
    workspace.scaffold().arg("generate").assert().success();

    let generated = workspace.read("demo/pom.xml");
    let edited = generated
        .replace(BEGIN, &format!("    <!-- hand written -->\n{BEGIN}"))
        .replace("<artifactId>gson</artifactId>", "<artifactId>stale</artifactId>");
    workspace.write("demo/pom.xml", &edited);

    workspace
        .scaffold()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    let manifest = workspace.read("demo/pom.xml");
    assert!(manifest.contains("    <!-- hand written -->\n"));
    assert!(manifest.contains("<artifactId>gson</artifactId>"));
    assert!(!manifest.contains("<artifactId>stale</artifactId>"));
}

#[test]
fn test_generate_refuses_malformed_manifest() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["gson"]);
    let original = "<project>\n    <!-- no markers here -->\n</project>\n";
    workspace.write("demo/pom.xml", original);

    workspace
        .scaffold()
        .arg("generate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("MalformedManifestError"));

    assert_eq!(workspace.read("demo/pom.xml"), original);
}

#[test]
fn test_failure_does_not_stop_other_projects() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "broken", &["nonexistent"]);
    write_project(workspace.path(), "healthy", &["gson"]);

    workspace
        .scaffold()
        .arg("generate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("UnknownBundleError"))
        .stdout(predicate::str::contains("nonexistent"))
        .stdout(predicate::str::contains("1 created, 0 updated, 0 unchanged, 1 failed"))
        .stderr(predicate::str::contains("1 of 2 project(s) failed"));

    assert!(workspace.file("healthy/pom.xml").exists());
    assert!(!workspace.file("broken/pom.xml").exists());
}

#[test]
fn test_generate_reports_version_conflict() {
    let workspace = TestWorkspace::new();
    ProjectFixture::new("demo")
        .pinned("gson", "2.9.0")
        .pinned("gson", "2.10.0")
        .write(workspace.path());

    workspace
        .scaffold()
        .arg("generate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("VersionConflictError"));
}

#[test]
fn test_generate_selected_project_only() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "first", &["gson"]);
    write_project(workspace.path(), "second", &["gson"]);

    workspace.scaffold().args(["generate", "first"]).assert().success();

    assert!(workspace.file("first/pom.xml").exists());
    assert!(!workspace.file("second/pom.xml").exists());
}

#[test]
fn test_generate_without_projects_fails() {
    let workspace = TestWorkspace::new();

    workspace
        .scaffold()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No scaffold.toml found"));
}

#[test]
fn test_javadoc_disabled_omits_build_section() {
    let workspace = TestWorkspace::new();
    ProjectFixture::new("demo").uses(&["gson"]).javadoc(false).write(workspace.path());

    workspace.scaffold().arg("generate").assert().success();

    let manifest = workspace.read("demo/pom.xml");
    assert!(!manifest.contains("maven-javadoc-plugin"));
    assert!(manifest.contains("<artifactId>gson</artifactId>"));
}

#[test]
fn test_max_parallel_flag_generates_everything() {
    let workspace = TestWorkspace::new();
    for name in ["one", "two", "three", "four", "five"] {
        write_project(workspace.path(), name, &["hookless"]);
    }

    workspace
        .scaffold()
        .args(["generate", "--max-parallel", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 created"));

    workspace.scaffold().args(["generate", "--max-parallel", "0"]).assert().failure();
}

#[test]
fn test_overlapping_paths_generate_each_project_once() {
    let workspace = TestWorkspace::new();
    write_project(workspace.path(), "demo", &["gson"]);

    workspace
        .scaffold()
        .args(["generate", ".", "demo", "demo/scaffold.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 created, 0 updated, 0 unchanged, 0 failed"));
}
