//! Utilities shared by the generator driver and the CLI.
//!
//! # Modules
//!
//! - [`fs`] - Atomic manifest writes with bounded retries
//! - [`progress`] - Progress bar shown while a workspace is processed

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, read_optional};
pub use progress::ProgressBar;
