//! Finding projects below workspace roots.

use crate::constants::PROJECT_FILE_NAME;
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never searched for projects.
const SKIPPED_DIRECTORIES: &[&str] = &["target", "node_modules"];

/// One project on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProjectLocation {
    /// Directory holding the project file.
    pub dir: PathBuf,
    /// The `scaffold.toml` file.
    pub project_file: PathBuf,
    /// The manifest generated next to it.
    pub manifest: PathBuf,
}

impl ProjectLocation {
    /// Location of the project whose file is `project_file`.
    #[must_use]
    pub fn new(project_file: PathBuf, manifest_file: &str) -> Self {
        let dir = match project_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            manifest: dir.join(manifest_file),
            dir,
            project_file,
        }
    }

    /// Short name for reports: the directory name.
    #[must_use]
    pub fn label(&self) -> String {
        self.dir
            .file_name()
            .map_or_else(|| self.dir.display().to_string(), |name| name.to_string_lossy().into_owned())
    }
}

/// Expand command-line paths into project locations, sorted by path.
///
/// A path may be a `scaffold.toml` file, a project directory containing one, or a
/// workspace directory that is searched up to `max_depth` levels deep. Hidden
/// directories and build output directories are skipped.
///
/// Overlapping inputs yield each project once: files are keyed by their
/// canonical path, and the first spelling seen is kept for display.
pub fn discover(paths: &[PathBuf], max_depth: usize, manifest_file: &str) -> Result<Vec<ProjectLocation>> {
    let mut found = BTreeMap::new();

    for path in paths {
        if !path.exists() {
            bail!("Path does not exist: {}", path.display());
        }

        if path.is_file() {
            if path.file_name().is_some_and(|name| name == PROJECT_FILE_NAME) {
                record(&mut found, path.clone())?;
                continue;
            }
            bail!("Not a {PROJECT_FILE_NAME} file: {}", path.display());
        }

        let direct = path.join(PROJECT_FILE_NAME);
        if direct.is_file() {
            record(&mut found, direct)?;
            continue;
        }

        let before = found.len();
        for entry in WalkDir::new(path)
            .max_depth(max_depth.saturating_add(1))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry))
        {
            let entry = entry?;
            if entry.file_type().is_file() && entry.file_name() == PROJECT_FILE_NAME {
                record(&mut found, entry.into_path())?;
            }
        }
        tracing::debug!(
            "Found {} project(s) below {}",
            found.len() - before,
            path.display()
        );
    }

    Ok(found.into_values().map(|file| ProjectLocation::new(file, manifest_file)).collect())
}

fn record(found: &mut BTreeMap<PathBuf, PathBuf>, file: PathBuf) -> Result<()> {
    let canonical = std::fs::canonicalize(&file)
        .with_context(|| format!("Failed to resolve path: {}", file.display()))?;
    found.entry(canonical).or_insert(file);
    Ok(())
}

fn is_skipped(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name.as_ref())
}

/// Whether `dir` directly contains a project file.
#[must_use]
pub fn is_project_dir(dir: &Path) -> bool {
    dir.join(PROJECT_FILE_NAME).is_file()
}
