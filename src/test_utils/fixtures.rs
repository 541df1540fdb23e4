//! Fixtures for project files and registries.

use crate::constants::PROJECT_FILE_NAME;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// A small registry in file form, used to exercise `--registry`.
pub const SAMPLE_REGISTRY: &str = r#"
[bundles.core]
coordinates = ["com.example:core:1.0.0"]
doc = "https://docs.example.com/core/{version}/"

[bundles.web]
coordinates = ["com.example:web:2.0.0"]
implies = ["core"]

[bundles.testing]
coordinates = [
    { group = "org.junit.jupiter", artifact = "junit-jupiter", version = "5.8.1", scope = "test" },
]
"#;

/// Builder for a `scaffold.toml` file.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    name: String,
    description: String,
    inception_year: i32,
    javadoc: bool,
    stagean: bool,
    uses: Vec<String>,
    links: Vec<String>,
    suppress: Vec<String>,
}

impl ProjectFixture {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: format!("Test project {name}."),
            inception_year: 2021,
            javadoc: true,
            stagean: false,
            uses: Vec::new(),
            links: Vec::new(),
            suppress: Vec::new(),
        }
    }

    /// Add plain string requests (bundle ids or inline coordinates).
    #[must_use]
    pub fn uses(mut self, uses: &[&str]) -> Self {
        self.uses.extend(uses.iter().map(|entry| format!("\"{entry}\"")));
        self
    }

    /// Add a pinned bundle request.
    #[must_use]
    pub fn pinned(mut self, bundle: &str, version: &str) -> Self {
        self.uses.push(format!("{{ bundle = \"{bundle}\", version = \"{version}\" }}"));
        self
    }

    #[must_use]
    pub const fn javadoc(mut self, enabled: bool) -> Self {
        self.javadoc = enabled;
        self
    }

    #[must_use]
    pub const fn stagean(mut self, enabled: bool) -> Self {
        self.stagean = enabled;
        self
    }

    #[must_use]
    pub fn link(mut self, url: &str) -> Self {
        self.links.push(url.to_string());
        self
    }

    #[must_use]
    pub fn suppress(mut self, bundle: &str) -> Self {
        self.suppress.push(bundle.to_string());
        self
    }

    /// The file content.
    pub fn to_toml(&self) -> String {
        let mut toml = String::new();
        let _ = writeln!(toml, "[project]");
        let _ = writeln!(toml, "name = \"{}\"", self.name);
        let _ = writeln!(toml, "description = \"{}\"", self.description);
        let _ = writeln!(toml, "inception-year = {}", self.inception_year);
        let _ = writeln!(toml, "javadoc = {}", self.javadoc);
        let _ = writeln!(toml, "stagean = {}", self.stagean);
        let _ = writeln!(toml);
        let _ = writeln!(toml, "[dependencies]");
        let _ = writeln!(toml, "use = [{}]", self.uses.join(", "));
        if !self.links.is_empty() || !self.suppress.is_empty() {
            let quoted = |items: &[String]| {
                items.iter().map(|item| format!("\"{item}\"")).collect::<Vec<_>>().join(", ")
            };
            let _ = writeln!(toml);
            let _ = writeln!(toml, "[javadoc]");
            let _ = writeln!(toml, "links = [{}]", quoted(&self.links));
            let _ = writeln!(toml, "suppress = [{}]", quoted(&self.suppress));
        }
        toml
    }

    /// Write the project into `root/<name>/scaffold.toml` and return its directory.
    pub fn write(&self, root: &Path) -> PathBuf {
        let dir = root.join(&self.name);
        std::fs::create_dir_all(&dir).expect("create project directory");
        std::fs::write(dir.join(PROJECT_FILE_NAME), self.to_toml()).expect("write project file");
        dir
    }
}

/// Write a project requesting `uses` with default metadata.
pub fn write_project(root: &Path, name: &str, uses: &[&str]) -> PathBuf {
    ProjectFixture::new(name).uses(uses).write(root)
}
