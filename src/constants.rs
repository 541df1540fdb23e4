//! Global constants used throughout the scaffold codebase.
//!
//! This module contains marker strings, file names, retry parameters, and other
//! values that are used across multiple modules. Defining them centrally keeps
//! the on-disk format discoverable in one place.

/// Name of the per-project configuration file.
///
/// Workspace discovery treats every directory containing this file as a project.
pub const PROJECT_FILE_NAME: &str = "scaffold.toml";

/// Default name of the generated build manifest, written next to [`PROJECT_FILE_NAME`].
pub const DEFAULT_MANIFEST_FILE_NAME: &str = "pom.xml";

/// Line that opens the generated region of a manifest.
///
/// Everything between this line and [`GENERATED_END_MARKER`] is owned by the
/// generator and replaced on every run. Both markers must appear exactly once.
pub const GENERATED_BEGIN_MARKER: &str = "<!-- scaffold:begin generated -->";

/// Line that closes the generated region of a manifest.
pub const GENERATED_END_MARKER: &str = "<!-- scaffold:end generated -->";

/// Bundle implicitly requested first when stage annotations are enabled.
pub const STAGEAN_BUNDLE: &str = "stagean";

/// Environment variable that overrides the generator configuration path.
pub const CONFIG_PATH_ENV: &str = "SCAFFOLD_CONFIG";

/// Default maximum directory depth searched below a workspace root.
pub const DEFAULT_DISCOVERY_DEPTH: usize = 4;

/// Starting delay for write retries (10ms).
///
/// `ExponentialBackoff` multiplies the delay by this base on each retry, so the
/// retries wait 10ms, 100ms and then [`MAX_BACKOFF_DELAY_MS`].
pub const STARTING_BACKOFF_DELAY_MS: u64 = 10;

/// Maximum backoff delay for write retries (200ms).
pub const MAX_BACKOFF_DELAY_MS: u64 = 200;

/// Number of retries after the first failed write attempt.
pub const MAX_WRITE_RETRIES: usize = 3;

/// Minimum number of projects processed concurrently regardless of CPU count.
pub const MIN_PARALLELISM: usize = 4;

/// Multiplier applied to CPU core count for default parallelism.
///
/// Generation is mostly file I/O, so a modest oversubscription keeps disks busy.
pub const PARALLELISM_CORE_MULTIPLIER: usize = 2;

/// Default project parallelism derived from the available CPU count.
#[must_use]
pub fn default_max_parallel() -> usize {
    let cores = std::thread::available_parallelism().map(std::num::NonZero::get).unwrap_or(1);
    (cores * PARALLELISM_CORE_MULTIPLIER).max(MIN_PARALLELISM)
}
