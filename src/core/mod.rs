//! Core types and error handling for scaffold.
//!
//! Everything in here is shared by the registry, resolver, renderer and CLI layers.

pub mod error;

pub use error::{ErrorContext, ScaffoldError, find_scaffold_error, user_friendly_error};
