//! Helpers shared by the integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace with its own isolated configuration directory.
pub struct TestWorkspace {
    temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("home/.config")).unwrap();
        Self {
            temp,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn file(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.file(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.file(relative)).unwrap()
    }

    /// `scaffold` running in the workspace root, with progress bars off and no
    /// user-level configuration.
    pub fn scaffold(&self) -> Command {
        let mut cmd = Command::cargo_bin("scaffold").unwrap();
        cmd.current_dir(self.path())
            .env_remove("SCAFFOLD_CONFIG")
            .env_remove("RUST_LOG")
            .env("HOME", self.file("home"))
            .env("XDG_CONFIG_HOME", self.file("home/.config"))
            .env("NO_COLOR", "1")
            .arg("--no-progress");
        cmd
    }
}
