//! Writing rendered regions into manifest files.
//!
//! A manifest is split into three parts by two marker lines:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>     <- before, kept byte for byte
//! <project ...>
//!     <version>1.2.0</version>
//! <!-- scaffold:begin generated -->
//!     ...                                    <- region, owned by the generator
//! <!-- scaffold:end generated -->
//!     <build>...</build>                     <- after, kept byte for byte
//! </project>
//! ```
//!
//! Marker lines are matched after trimming whitespace, so they may be indented.
//! Each must appear exactly once, begin before end; anything else is a
//! [`ScaffoldError::MalformedManifest`] and the file is left alone.

use crate::constants::{GENERATED_BEGIN_MARKER, GENERATED_END_MARKER};
use crate::core::ScaffoldError;
use crate::utils::fs::{atomic_write, read_optional};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// What a write did, or would do, to a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    /// The generated region already matched.
    Unchanged,
    /// The generated region was replaced.
    Updated,
    /// The manifest did not exist and was created.
    Created,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unchanged => "unchanged",
            Self::Updated => "updated",
            Self::Created => "created",
        })
    }
}

/// Outcome of comparing a rendered region with a manifest, plus the new content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPlan {
    pub outcome: WriteOutcome,
    /// Full file content to write; `None` when nothing changes.
    pub content: Option<String>,
}

/// The three parts of a manifest around its generated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions<'a> {
    /// Everything up to and including the begin marker line.
    pub before: &'a str,
    /// Text between the marker lines.
    pub region: &'a str,
    /// The end marker line and everything after it.
    pub after: &'a str,
    /// Line terminator used by the begin marker line.
    pub newline: &'a str,
}

/// Locate the generated region of `content`.
///
/// `path` is only used in error messages.
pub fn split_regions<'a>(content: &'a str, path: &Path) -> Result<Regions<'a>, ScaffoldError> {
    let malformed = |reason: String| ScaffoldError::MalformedManifest {
        path: path.display().to_string(),
        reason,
    };

    let mut begins = Vec::new();
    let mut ends = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed == GENERATED_BEGIN_MARKER {
            begins.push((offset, offset + line.len(), line));
        } else if trimmed == GENERATED_END_MARKER {
            ends.push(offset);
        }
        offset += line.len();
    }

    let (region_start, line_end, begin_line) = match begins.as_slice() {
        [] => return Err(malformed(format!("missing '{GENERATED_BEGIN_MARKER}' marker"))),
        [single] => *single,
        many => {
            return Err(malformed(format!(
                "'{GENERATED_BEGIN_MARKER}' appears {} times",
                many.len()
            )));
        }
    };
    let region_end = match ends.as_slice() {
        [] => return Err(malformed(format!("missing '{GENERATED_END_MARKER}' marker"))),
        [single] => *single,
        many => {
            return Err(malformed(format!(
                "'{GENERATED_END_MARKER}' appears {} times",
                many.len()
            )));
        }
    };
    if region_end < region_start {
        return Err(malformed("end marker precedes begin marker".to_string()));
    }
    if !begin_line.ends_with('\n') {
        return Err(malformed("begin marker is the last line of the file".to_string()));
    }

    let newline = if begin_line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    };
    Ok(Regions {
        before: &content[..line_end],
        region: &content[line_end..region_end],
        after: &content[region_end..],
        newline,
    })
}

/// Content of a manifest that does not exist yet.
#[must_use]
pub fn new_manifest(rendered: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!--
    The generated region of this file is maintained by scaffold.
    Edit scaffold.toml and run `scaffold generate` to change it.
    Everything outside the markers is left untouched.
-->
<project xmlns="http://maven.apache.org/POM/4.0.0"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <version>0.1.0-SNAPSHOT</version>
{GENERATED_BEGIN_MARKER}
{rendered}{GENERATED_END_MARKER}
</project>
"#
    )
}

/// Decide what writing `rendered` over `existing` would do.
///
/// Pure; `path` is only used in error messages.
pub fn plan_content(
    existing: Option<&str>,
    rendered: &str,
    path: &Path,
) -> Result<ManifestPlan, ScaffoldError> {
    // Custom templates may be saved with CRLF line endings.
    let rendered = rendered.replace("\r\n", "\n");
    let Some(existing) = existing else {
        return Ok(ManifestPlan {
            outcome: WriteOutcome::Created,
            content: Some(new_manifest(&rendered)),
        });
    };

    let regions = split_regions(existing, path)?;
    let region = if regions.newline == "\n" {
        rendered
    } else {
        rendered.replace('\n', regions.newline)
    };

    if regions.region == region {
        return Ok(ManifestPlan {
            outcome: WriteOutcome::Unchanged,
            content: None,
        });
    }

    let mut content = String::with_capacity(regions.before.len() + region.len() + regions.after.len());
    content.push_str(regions.before);
    content.push_str(&region);
    content.push_str(regions.after);
    Ok(ManifestPlan {
        outcome: WriteOutcome::Updated,
        content: Some(content),
    })
}

/// Decide what writing `rendered` to the manifest at `path` would do, without writing.
pub async fn plan(path: &Path, rendered: &str) -> Result<ManifestPlan, ScaffoldError> {
    let existing = read_optional(path).await?;
    plan_content(existing.as_deref(), rendered, path)
}

/// Write `rendered` into the manifest at `path`.
///
/// Nothing is written when the region is already current or the markers are
/// malformed.
pub async fn write(path: &Path, rendered: &str) -> Result<WriteOutcome, ScaffoldError> {
    let plan = plan(path, rendered).await?;
    match &plan.content {
        Some(content) => {
            atomic_write(path, content.as_bytes()).await?;
            info!("{} manifest {}", plan.outcome, path.display());
        }
        None => debug!("Manifest {} is up to date", path.display()),
    }
    Ok(plan.outcome)
}
