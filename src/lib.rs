//! scaffold - build-manifest generator for a family of related libraries
//!
//! Each library in a family declares its identity and a list of capability
//! requests ("use this bundle") in a small `scaffold.toml` file. scaffold resolves
//! those requests against a shared registry of dependency bundles into a
//! deduplicated, deterministically ordered dependency list plus matching API
//! documentation links, and keeps the generated region of each library's build
//! manifest up to date.
//!
//! # Architecture Overview
//!
//! ```text
//! scaffold.toml ──► ProjectDescriptor ──► Resolver ──► Resolution ──► Renderer ──► pom.xml
//!                                            ▲
//!                                         Registry
//! ```
//!
//! - Projects are plain data; there is no per-project code.
//! - The registry is an immutable value built once and shared by all workers.
//! - Resolution is pure and deterministic.
//! - Writes replace only the region between two marker lines, and only when its
//!   content changed, so regenerating an up-to-date workspace touches nothing.
//!
//! # Core Modules
//!
//! - [`registry`] - Bundle table, registry files and consistency checks
//! - [`project`] - Project descriptors and the `scaffold.toml` loader
//! - [`resolver`] - Closure expansion, version pinning and conflict detection
//! - [`render`] - Template rendering and region-preserving manifest writes
//!
//! ## Supporting Modules
//!
//! - [`workspace`] - Project discovery and the parallel generation driver
//! - [`config`] - Generator configuration (`scaffold-config.toml`)
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and user-facing error reporting
//! - [`utils`] - Atomic file writes and progress bars
//! - [`constants`] - File names, markers and tuning values
//!
//! # Project File (scaffold.toml)
//!
//! ```toml
//! [project]
//! name = "foxcache"
//! pretty-name = "Fox Cache"
//! description = "Reactive persistent cache for applications based on Hookless."
//! inception-year = 2020
//! jdk = 17
//! stagean = true
//!
//! [dependencies]
//! use = [
//!     "closeablescope",
//!     { bundle = "hookless", version = "0.17.1" },
//!     "com.esotericsoftware:kryo:5.2.0",
//!     "junit",
//! ]
//! ```
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use scaffold_cli::project::ProjectDescriptor;
//! use scaffold_cli::registry::Registry;
//! use scaffold_cli::render::{Renderer, writer};
//! use scaffold_cli::resolver::Resolver;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let project = ProjectDescriptor::load(Path::new("foxcache/scaffold.toml"))?;
//! let resolution = Resolver::new(Arc::new(Registry::builtin()?)).resolve(&project)?;
//! let region = Renderer::new()?.render_resolution(&project, &resolution)?;
//! let outcome = writer::write(Path::new("foxcache/pom.xml"), &region).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod project;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod utils;
pub mod workspace;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
