//! Bundle table compiled into the binary.
//!
//! Versions here are the registry snapshot; bumping one regenerates every
//! project that requests the bundle on the next run.

use super::{BundleDescriptor, Coordinate, Scope};

fn coord(group: &str, artifact: &str, version: &str) -> Coordinate {
    Coordinate::new(group, artifact, version)
}

pub(super) fn bundles() -> Vec<BundleDescriptor> {
    vec![
        // machinezoo libraries
        BundleDescriptor::new("stagean")
            .coordinate(coord("com.machinezoo.stagean", "stagean", "1.3.0"))
            .doc("https://stagean.machinezoo.com/javadoc/"),
        BundleDescriptor::new("closeablescope")
            .coordinate(coord("com.machinezoo.closeablescope", "closeablescope", "1.0.1"))
            .doc("https://closeablescope.machinezoo.com/javadoc/"),
        BundleDescriptor::new("noexception")
            .coordinate(coord("com.machinezoo.noexception", "noexception", "1.7.1"))
            .doc("https://noexception.machinezoo.com/javadocs/core/"),
        BundleDescriptor::new("noexception-slf4j")
            .coordinate(coord("com.machinezoo.noexception", "noexception-slf4j", "1.7.1"))
            .implies(["noexception", "slf4j"])
            .doc("https://noexception.machinezoo.com/javadocs/slf4j/"),
        BundleDescriptor::new("hookless")
            .coordinate(coord("com.machinezoo.hookless", "hookless", "0.17.1"))
            .implies(["closeablescope", "noexception"])
            .doc("https://hookless.machinezoo.com/javadoc/"),
        BundleDescriptor::new("hookless-servlets")
            .coordinate(coord("com.machinezoo.hookless", "hookless-servlets", "0.17.1"))
            .implies(["hookless", "servlet-api"])
            .doc("https://hookless.machinezoo.com/javadoc/"),
        BundleDescriptor::new("pushmode")
            .coordinate(coord("com.machinezoo.pushmode", "pushmode", "0.25.1"))
            .implies(["hookless"])
            .doc("https://pushmode.machinezoo.com/javadoc/"),
        BundleDescriptor::new("ladybugformatters")
            .coordinate(coord("com.machinezoo.ladybugformatters", "ladybugformatters", "0.1.0"))
            .implies(["pushmode"])
            .doc_unavailable(),
        BundleDescriptor::new("meerkatwidgets")
            .coordinate(coord("com.machinezoo.meerkatwidgets", "meerkatwidgets", "0.1.0"))
            .implies(["pushmode", "ladybugformatters"])
            .doc_unavailable(),
        BundleDescriptor::new("foxcache")
            .coordinate(coord("com.machinezoo.foxcache", "foxcache", "0.1.1"))
            .implies(["hookless", "kryo"])
            .doc_unavailable(),
        // third-party libraries
        BundleDescriptor::new("slf4j")
            .coordinate(coord("org.slf4j", "slf4j-api", "1.7.32"))
            .doc("https://www.slf4j.org/apidocs/"),
        BundleDescriptor::new("streamex")
            .coordinate(coord("one.util", "streamex", "0.8.1"))
            .doc("https://javadoc.io/doc/{group}/{artifact}/{version}/"),
        BundleDescriptor::new("gson")
            .coordinate(coord("com.google.code.gson", "gson", "2.8.9"))
            .doc("https://javadoc.io/doc/{group}/{artifact}/{version}/"),
        BundleDescriptor::new("guava")
            .coordinate(coord("com.google.guava", "guava", "31.0.1-jre"))
            .doc("https://guava.dev/releases/{version}/api/docs/"),
        BundleDescriptor::new("commons-lang")
            .coordinate(coord("org.apache.commons", "commons-lang3", "3.12.0"))
            .doc("https://commons.apache.org/proper/commons-lang/apidocs/"),
        BundleDescriptor::new("commons-io")
            .coordinate(coord("commons-io", "commons-io", "2.11.0"))
            .doc("https://commons.apache.org/proper/commons-io/apidocs/"),
        BundleDescriptor::new("commons-math")
            .coordinate(coord("org.apache.commons", "commons-math3", "3.6.1"))
            .doc("https://commons.apache.org/proper/commons-math/javadocs/api-{version}/"),
        BundleDescriptor::new("kryo")
            .coordinate(coord("com.esotericsoftware", "kryo", "5.2.0"))
            .doc_unavailable(),
        BundleDescriptor::new("servlet-api")
            .coordinate(coord("jakarta.servlet", "jakarta.servlet-api", "5.0.0").with_scope(Scope::Provided))
            .doc("https://jakarta.ee/specifications/servlet/5.0/apidocs/"),
        BundleDescriptor::new("jfreechart")
            .coordinate(coord("org.jfree", "jfreechart", "1.5.3"))
            .coordinate(coord("org.jfree", "org.jfree.svg", "5.0.2"))
            .doc_unavailable(),
        // test bundles
        BundleDescriptor::new("junit")
            .coordinate(coord("org.junit.jupiter", "junit-jupiter", "5.8.1").with_scope(Scope::Test))
            .coordinate(coord("org.hamcrest", "hamcrest", "2.2").with_scope(Scope::Test)),
        BundleDescriptor::new("slf4j-test")
            .coordinate(coord("com.github.valfirst", "slf4j-test", "2.3.0").with_scope(Scope::Test)),
    ]
}
