//! Integration test suite for scaffold
//!
//! End-to-end tests that run the `scaffold` binary against projects laid out in
//! temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **check**: Read-only staleness reporting
//! - **config**: Generator configuration file handling
//! - **generate**: Manifest creation, idempotence and failure isolation
//! - **registry**: Registry listing and validation
//! - **tree**: Resolution display

mod common;

mod check;
mod config;
mod generate;
mod registry;
mod tree;
