//! File system helpers for manifest output.
//!
//! Manifests are never written in place. Content goes to a uniquely named
//! temporary file in the target directory, is synced to disk, and is then renamed
//! over the target, so readers see either the old manifest or the new one and an
//! interrupted run never leaves a truncated file.
//!
//! # Retry Strategy
//!
//! Writes that fail with a transient error kind are retried with exponential
//! backoff:
//! - Initial delay: [`STARTING_BACKOFF_DELAY_MS`]
//! - Max delay: [`MAX_BACKOFF_DELAY_MS`] (capped)
//! - Retries: [`MAX_WRITE_RETRIES`]
//! - Retried kinds: `Interrupted`, `WouldBlock`, `TimedOut`, and `PermissionDenied`
//!   (antivirus scanners and indexers briefly lock freshly renamed files on Windows)

use crate::constants::{MAX_BACKOFF_DELAY_MS, MAX_WRITE_RETRIES, STARTING_BACKOFF_DELAY_MS};
use crate::core::ScaffoldError;
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;

/// Whether an I/O error kind is worth retrying.
#[must_use]
pub fn is_transient(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::Interrupted
            | ErrorKind::WouldBlock
            | ErrorKind::TimedOut
            | ErrorKind::PermissionDenied
    )
}

/// Atomically replace `path` with `content`, retrying transient failures.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns [`ScaffoldError::FileSystemError`] once retries are exhausted or on the
/// first non-transient failure. The target file is untouched in either case.
pub async fn atomic_write(path: &Path, content: &[u8]) -> Result<(), ScaffoldError> {
    let target = path.to_path_buf();
    let content: Arc<[u8]> = Arc::from(content);

    with_write_retries(path, || {
        let target = target.clone();
        let content = Arc::clone(&content);
        async move {
            tokio::task::spawn_blocking(move || write_via_temp(&target, &content))
                .await
                .map_err(io::Error::other)?
        }
    })
    .await
}

/// Delays between write attempts.
fn retry_delays() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(STARTING_BACKOFF_DELAY_MS)
        .max_delay(Duration::from_millis(MAX_BACKOFF_DELAY_MS))
        .take(MAX_WRITE_RETRIES)
}

/// Run `operation`, retrying it while it fails with a transient error kind.
///
/// `operation` runs at most `MAX_WRITE_RETRIES + 1` times.
async fn with_write_retries<F, Fut>(path: &Path, operation: F) -> Result<(), ScaffoldError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    RetryIf::spawn(retry_delays(), operation, |error: &io::Error| {
        let retry = is_transient(error.kind());
        if retry {
            tracing::debug!(
                target: "fs::retry",
                "Transient error writing {}: {} (kind: {:?}), will retry",
                path.display(),
                error,
                error.kind()
            );
        }
        retry
    })
    .await
    .map_err(|error| {
        tracing::warn!(
            target: "fs::retry",
            "Giving up writing {}: {} (kind: {:?})",
            path.display(),
            error,
            error.kind()
        );
        ScaffoldError::FileSystemError {
            operation: "writing".to_string(),
            path: path.display().to_string(),
            reason: error.to_string(),
        }
    })
}

fn write_via_temp(target: &Path, content: &[u8]) -> io::Result<()> {
    let directory = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(directory)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Read a text file, treating a missing file as `None`.
///
/// # Errors
///
/// Returns [`ScaffoldError::FileSystemError`] for any failure other than `NotFound`.
pub async fn read_optional(path: &Path) -> Result<Option<String>, ScaffoldError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(ScaffoldError::FileSystemError {
            operation: "reading".to_string(),
            path: path.display().to_string(),
            reason: error.to_string(),
        }),
    }
}
