//! Tests for the resolver module.

use super::*;
use crate::project::{DependencyRequest, ProjectFlags};
use crate::registry::BundleDescriptor;

fn bundle(id: &str, version: &str) -> BundleDescriptor {
    BundleDescriptor::new(id).coordinate(Coordinate::new("g", id, version))
}

fn resolver(bundles: Vec<BundleDescriptor>) -> Resolver {
    Resolver::new(Arc::new(Registry::from_bundles(bundles).unwrap()))
}

fn project(requests: &[DependencyRequest]) -> ProjectDescriptor {
    requests
        .iter()
        .cloned()
        .fold(ProjectDescriptor::new("demo"), ProjectDescriptor::request)
}

fn coordinates(resolution: &Resolution) -> Vec<String> {
    resolution.dependencies.iter().map(ToString::to_string).collect()
}

#[test]
fn test_pushmode_emits_hookless_first() {
    let resolver = resolver(vec![
        bundle("hookless", "1.0"),
        bundle("pushmode", "2.0").implies(["hookless"]),
    ]);

    let resolution = resolver.resolve(&project(&[DependencyRequest::bundle("pushmode")])).unwrap();

    assert_eq!(coordinates(&resolution), vec!["g:hookless:1.0", "g:pushmode:2.0"]);
    assert_eq!(resolution.bundle_ids(), vec!["pushmode", "hookless"]);
    assert!(!resolution.dependencies[1].via_transitive);
    assert!(resolution.dependencies[0].via_transitive);
    assert_eq!(resolution.dependencies[0].source_bundle, "hookless");
}

#[test]
fn test_closure_preserves_request_order() {
    let resolver = resolver(vec![
        bundle("a", "1").implies(["c"]),
        bundle("b", "1"),
        bundle("c", "1"),
    ]);

    let resolution = resolver
        .resolve(&project(&[DependencyRequest::bundle("a"), DependencyRequest::bundle("b")]))
        .unwrap();

    assert_eq!(resolution.bundle_ids(), vec!["a", "c", "b"]);
    assert_eq!(resolution.closure[1].implied_by.as_deref(), Some("a"));
    assert_eq!(resolution.closure[1].depth, 1);
    assert_eq!(coordinates(&resolution), vec!["g:c:1", "g:a:1", "g:b:1"]);
}

#[test]
fn test_no_bundle_twice_in_closure() {
    let resolver = resolver(vec![
        bundle("base", "1"),
        bundle("left", "1").implies(["base"]),
        bundle("right", "1").implies(["base"]),
    ]);

    let resolution = resolver
        .resolve(&project(&[
            DependencyRequest::bundle("left"),
            DependencyRequest::bundle("right"),
            DependencyRequest::bundle("base"),
            DependencyRequest::bundle("left"),
        ]))
        .unwrap();

    assert_eq!(resolution.bundle_ids(), vec!["left", "base", "right"]);
    assert_eq!(resolution.dependencies.len(), 3);
}

#[test]
fn test_first_reachable_path_wins() {
    let resolver = resolver(vec![
        bundle("shared", "1"),
        bundle("first", "1").implies(["shared"]),
        bundle("second", "1").implies(["shared"]),
    ]);

    let resolution = resolver
        .resolve(&project(&[DependencyRequest::bundle("first"), DependencyRequest::bundle("second")]))
        .unwrap();

    let shared = resolution.closure.iter().find(|entry| entry.bundle_id == "shared").unwrap();
    assert_eq!(shared.implied_by.as_deref(), Some("first"));
}

#[test]
fn test_resolution_is_deterministic() {
    let resolver = resolver(vec![
        bundle("a", "1").implies(["b", "c"]),
        bundle("b", "1").implies(["d"]),
        bundle("c", "1").implies(["d"]),
        bundle("d", "1").doc("https://docs.example.com/{artifact}/{version}/"),
    ]);
    let project = project(&[DependencyRequest::bundle("a")]);

    let first = resolver.resolve(&project).unwrap();
    let second = resolver.resolve(&project).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_override_applies_to_own_coordinates_only() {
    let resolver = resolver(vec![
        bundle("hookless", "1.0"),
        bundle("pushmode", "2.0").implies(["hookless"]),
    ]);

    let resolution =
        resolver.resolve(&project(&[DependencyRequest::pinned("pushmode", "2.5")])).unwrap();

    assert_eq!(coordinates(&resolution), vec!["g:hookless:1.0", "g:pushmode:2.5"]);
}

#[test]
fn test_override_on_implied_bundle_request() {
    let resolver = resolver(vec![
        bundle("hookless", "1.0"),
        bundle("pushmode", "2.0").implies(["hookless"]),
    ]);

    let resolution = resolver
        .resolve(&project(&[
            DependencyRequest::bundle("pushmode"),
            DependencyRequest::pinned("hookless", "1.1"),
        ]))
        .unwrap();

    assert_eq!(coordinates(&resolution), vec!["g:hookless:1.1", "g:pushmode:2.0"]);
}

#[test]
fn test_single_pin_succeeds() {
    let resolver = resolver(vec![bundle("x", "0.9")]);
    let resolution = resolver.resolve(&project(&[DependencyRequest::pinned("x", "1.0")])).unwrap();
    assert_eq!(coordinates(&resolution), vec!["g:x:1.0"]);
}

#[test]
fn test_conflicting_pins_fail() {
    let resolver = resolver(vec![bundle("x", "0.9")]);
    let err = resolver
        .resolve(&project(&[
            DependencyRequest::pinned("x", "1.0"),
            DependencyRequest::pinned("x", "2.0"),
        ]))
        .unwrap_err();

    assert_eq!(err.kind(), "VersionConflictError");
    let message = err.to_string();
    assert!(message.contains("x@1.0"));
    assert!(message.contains("x@2.0"));
    assert!(message.contains("demo"));
}

#[test]
fn test_cycle_fails_any_resolution_touching_it() {
    let resolver = resolver(vec![
        bundle("a", "1").implies(["b"]),
        bundle("b", "1").implies(["a"]),
        bundle("c", "1").implies(["b"]),
        bundle("free", "1"),
    ]);

    for root in ["a", "b", "c"] {
        let err = resolver.resolve(&project(&[DependencyRequest::bundle(root)])).unwrap_err();
        assert_eq!(err.kind(), "RegistryCycleError", "resolving {root}");
    }

    let err = resolver.resolve(&project(&[DependencyRequest::bundle("a")])).unwrap_err();
    assert!(err.to_string().contains("a -> b -> a"));

    assert!(resolver.resolve(&project(&[DependencyRequest::bundle("free")])).is_ok());
}

#[test]
fn test_unknown_bundle_names_origin_and_suggestion() {
    let resolver = resolver(vec![bundle("hookless", "1.0"), bundle("broken", "1").implies(["ghost"])]);

    let err = resolver.resolve(&project(&[DependencyRequest::bundle("hookles")])).unwrap_err();
    assert_eq!(err.kind(), "UnknownBundleError");
    let message = err.to_string();
    assert!(message.contains("requested directly"));
    assert!(message.contains("Did you mean 'hookless'?"));

    let err = resolver.resolve(&project(&[DependencyRequest::bundle("broken")])).unwrap_err();
    assert!(err.to_string().contains("implied by 'broken'"));
}

#[test]
fn test_unversioned_coordinate_needs_pin() {
    let resolver = resolver(vec![
        BundleDescriptor::new("floating").coordinate(Coordinate::unversioned("g", "floating")),
    ]);

    let err = resolver.resolve(&project(&[DependencyRequest::bundle("floating")])).unwrap_err();
    assert_eq!(err.kind(), "MissingVersionError");
    assert!(err.to_string().contains("g:floating"));

    let resolution =
        resolver.resolve(&project(&[DependencyRequest::pinned("floating", "3.1")])).unwrap();
    assert_eq!(coordinates(&resolution), vec!["g:floating:3.1"]);
}

#[test]
fn test_multi_coordinate_bundle_keeps_internal_order() {
    let resolver = resolver(vec![
        BundleDescriptor::new("junit")
            .coordinate(Coordinate::new("org.junit.jupiter", "junit-jupiter", "5.8.1").with_scope(Scope::Test))
            .coordinate(Coordinate::new("org.hamcrest", "hamcrest", "2.2").with_scope(Scope::Test)),
    ]);

    let resolution = resolver.resolve(&project(&[DependencyRequest::bundle("junit")])).unwrap();
    assert_eq!(
        coordinates(&resolution),
        vec!["org.junit.jupiter:junit-jupiter:5.8.1 (test)", "org.hamcrest:hamcrest:2.2 (test)"]
    );
}

#[test]
fn test_shared_coordinate_emitted_once() {
    let resolver = resolver(vec![
        BundleDescriptor::new("one").coordinate(Coordinate::new("g", "shared", "1.0")),
        BundleDescriptor::new("two")
            .coordinate(Coordinate::new("g", "shared", "2.0"))
            .coordinate(Coordinate::new("g", "two", "2.0")),
    ]);

    let resolution = resolver
        .resolve(&project(&[DependencyRequest::bundle("one"), DependencyRequest::bundle("two")]))
        .unwrap();

    assert_eq!(coordinates(&resolution), vec!["g:shared:1.0", "g:two:2.0"]);
}

#[test]
fn test_inline_requests_dedup() {
    let resolver = resolver(vec![bundle("hookless", "1.0")]);
    let kryo = Coordinate::parse("com.esotericsoftware:kryo:5.2.0").unwrap();

    let resolution = resolver
        .resolve(&project(&[
            DependencyRequest::inline(kryo.clone()),
            DependencyRequest::bundle("hookless"),
            DependencyRequest::inline(kryo),
        ]))
        .unwrap();

    assert_eq!(resolution.bundle_ids(), vec!["com.esotericsoftware:kryo", "hookless"]);
    assert_eq!(coordinates(&resolution), vec!["com.esotericsoftware:kryo:5.2.0", "g:hookless:1.0"]);
}

#[test]
fn test_inline_requests_with_different_versions_conflict() {
    let resolver = resolver(vec![]);
    let err = resolver
        .resolve(&project(&[
            DependencyRequest::inline(Coordinate::new("g", "a", "1.0")),
            DependencyRequest::inline(Coordinate::new("g", "a", "2.0")),
        ]))
        .unwrap_err();
    assert_eq!(err.kind(), "VersionConflictError");
}

#[test]
fn test_links_follow_closure_order_and_filters() {
    let resolver = resolver(vec![
        bundle("a", "1").implies(["c"]).doc("https://a.example.com/"),
        bundle("b", "1").doc("https://b.example.com/{version}/"),
        bundle("c", "1").doc("https://c.example.com/"),
        bundle("hidden", "1").doc_unavailable(),
        bundle("plain", "1"),
    ]);
    let mut project = project(&[
        DependencyRequest::bundle("a"),
        DependencyRequest::pinned("b", "4.2"),
        DependencyRequest::bundle("hidden"),
        DependencyRequest::bundle("plain"),
    ]);
    project.extra_links = vec!["https://extra.example.com/".to_string(), "https://a.example.com/".to_string()];

    let resolution = resolver.resolve(&project).unwrap();
    assert_eq!(
        resolution.links.as_slice(),
        [
            "https://a.example.com/",
            "https://c.example.com/",
            "https://b.example.com/4.2/",
            "https://extra.example.com/",
        ]
    );

    let suppressed = project.clone().suppress_link("c");
    let resolution = resolver.resolve(&suppressed).unwrap();
    assert!(!resolution.links.contains("https://c.example.com/"));
    assert_eq!(resolution.links.len(), 3);
}

#[test]
fn test_suppression_of_unused_bundle_is_detected() {
    let resolver = resolver(vec![bundle("a", "1").doc("https://a.example.com/")]);
    let kryo = Coordinate::parse("com.esotericsoftware:kryo:5.2.0").unwrap();
    let project = project(&[DependencyRequest::bundle("a"), DependencyRequest::inline(kryo)])
        .suppress_link("a")
        .suppress_link("kryo");

    let resolution = resolver.resolve(&project).unwrap();
    assert!(resolution.links.is_empty());
    let unmatched = unmatched_suppressions(&resolution.closure, &project);
    assert_eq!(unmatched, vec!["kryo"]);
}

#[test]
fn test_javadoc_disabled_emits_no_links() {
    let resolver = resolver(vec![bundle("a", "1").doc("https://a.example.com/")]);
    let mut project = project(&[DependencyRequest::bundle("a")]).with_flags(ProjectFlags {
        javadoc: false,
        ..ProjectFlags::default()
    });
    project.extra_links.push("https://extra.example.com/".to_string());

    let resolution = resolver.resolve(&project).unwrap();
    assert!(resolution.links.is_empty());
    assert_eq!(resolution.dependencies.len(), 1);
}

#[test]
fn test_stagean_flag_resolves_base_bundle_first() {
    let resolver = Resolver::new(Arc::new(Registry::builtin().unwrap()));
    let project = project(&[DependencyRequest::bundle("closeablescope")]).with_flags(ProjectFlags {
        stagean: true,
        ..ProjectFlags::default()
    });

    let resolution = resolver.resolve(&project).unwrap();
    assert_eq!(resolution.bundle_ids(), vec!["stagean", "closeablescope"]);
    assert_eq!(resolution.dependencies[0].artifact, "stagean");
}

#[test]
fn test_builtin_foxcache_like_project() {
    let resolver = Resolver::new(Arc::new(Registry::builtin().unwrap()));
    let project = project(&[
        DependencyRequest::bundle("closeablescope"),
        DependencyRequest::bundle("noexception"),
        DependencyRequest::bundle("noexception-slf4j"),
        DependencyRequest::bundle("hookless"),
        DependencyRequest::inline(Coordinate::new("com.esotericsoftware", "kryo", "5.2.0")),
        DependencyRequest::bundle("gson"),
        DependencyRequest::bundle("junit"),
    ]);

    let resolution = resolver.resolve(&project).unwrap();
    let ids = resolution.bundle_ids();
    assert_eq!(
        ids,
        vec![
            "closeablescope",
            "noexception",
            "noexception-slf4j",
            "slf4j",
            "hookless",
            "com.esotericsoftware:kryo",
            "gson",
            "junit"
        ]
    );
    assert!(
        resolution
            .links
            .contains("https://javadoc.io/doc/com.google.code.gson/gson/2.8.9/")
    );
    let last = resolution.dependencies.last().unwrap();
    assert_eq!(last.scope, Scope::Test);
}
