//! Error handling for scaffold
//!
//! This module provides the error taxonomy and user-friendly error reporting for the
//! generator. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** so callers can match on the failure kind
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`ScaffoldError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! # Error Categories
//!
//! - **Resolution**: [`ScaffoldError::UnknownBundle`], [`ScaffoldError::RegistryCycle`],
//!   [`ScaffoldError::VersionConflict`], [`ScaffoldError::MissingVersion`]
//! - **Manifest output**: [`ScaffoldError::MalformedManifest`],
//!   [`ScaffoldError::FileSystemError`], [`ScaffoldError::TemplateError`]
//! - **Configuration**: [`ScaffoldError::ProjectConfigError`],
//!   [`ScaffoldError::RegistryConfigError`], [`ScaffoldError::ConfigError`]
//!
//! Resolution errors are pure data: they carry the project and bundle identifiers
//! needed to act on them and never leave partial output behind.
//!
//! # Examples
//!
//! ```rust,no_run
//! use scaffold_cli::core::{ScaffoldError, user_friendly_error};
//!
//! let error = ScaffoldError::VersionConflict {
//!     project: "foxcache".to_string(),
//!     bundle: "hookless".to_string(),
//!     first: "request #2 (hookless@1.0)".to_string(),
//!     second: "request #5 (hookless@2.0)".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for scaffold operations.
///
/// Each variant names one failure kind; [`ScaffoldError::kind`] returns the stable
/// kind name printed next to per-project failures.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// A request or an implication names a bundle the registry does not contain.
    ///
    /// # Fields
    /// - `project`: The project being resolved
    /// - `bundle`: The missing bundle id
    /// - `origin`: How the bundle was reached ("requested directly" or "implied by 'x'")
    /// - `hint`: A "did you mean" suffix, empty when no registry id is close enough
    #[error("Unknown bundle '{bundle}' ({origin}) in project '{project}'{hint}")]
    UnknownBundle {
        /// The project being resolved
        project: String,
        /// The bundle id that is not in the registry
        bundle: String,
        /// How the bundle was reached
        origin: String,
        /// Optional "did you mean" suffix
        hint: String,
    },

    /// The registry's implication graph contains a cycle.
    ///
    /// This is a registry authoring defect rather than a project error, but it is
    /// reported against the project whose resolution ran into it.
    #[error("Bundle implication cycle detected while resolving '{project}': {chain}")]
    RegistryCycle {
        /// The project being resolved
        project: String,
        /// The cycle, rendered as `a -> b -> a`
        chain: String,
    },

    /// Two requests pin the same bundle to different versions.
    #[error(
        "Conflicting version overrides for bundle '{bundle}' in project '{project}': {first} vs {second}"
    )]
    VersionConflict {
        /// The project being resolved
        project: String,
        /// The bundle with irreconcilable overrides
        bundle: String,
        /// The first conflicting request
        first: String,
        /// The second conflicting request
        second: String,
    },

    /// A registry coordinate has no version and no request supplied one.
    #[error("Bundle '{bundle}' leaves '{artifact}' unversioned in project '{project}'")]
    MissingVersion {
        /// The project being resolved
        project: String,
        /// The bundle declaring the unversioned coordinate
        bundle: String,
        /// The coordinate as `group:artifact`
        artifact: String,
    },

    /// An existing manifest has missing, duplicated, or misordered region markers.
    #[error("Malformed manifest {path}: {reason}")]
    MalformedManifest {
        /// Path of the manifest that could not be updated
        path: String,
        /// What is wrong with the markers
        reason: String,
    },

    /// Reading, writing, or renaming a file failed.
    #[error("File system error while {operation} {path}: {reason}")]
    FileSystemError {
        /// The operation that failed (e.g., "writing", "renaming")
        operation: String,
        /// Path where the error occurred
        path: String,
        /// Underlying reason
        reason: String,
    },

    /// The manifest template failed to render.
    #[error("Template error: {reason}")]
    TemplateError {
        /// Rendering failure including the Tera error chain
        reason: String,
    },

    /// A project's `scaffold.toml` could not be parsed or validated.
    #[error("Invalid project configuration {file}: {reason}")]
    ProjectConfigError {
        /// Path of the project file
        file: String,
        /// Specific reason for the failure
        reason: String,
    },

    /// A registry table could not be loaded or is inconsistent.
    #[error("Invalid bundle registry: {reason}")]
    RegistryConfigError {
        /// Specific reason for the failure
        reason: String,
    },

    /// Generator configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl ScaffoldError {
    /// Stable name of the failure kind, used in per-project CLI reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownBundle {
                ..
            } => "UnknownBundleError",
            Self::RegistryCycle {
                ..
            } => "RegistryCycleError",
            Self::VersionConflict {
                ..
            } => "VersionConflictError",
            Self::MissingVersion {
                ..
            } => "MissingVersionError",
            Self::MalformedManifest {
                ..
            } => "MalformedManifestError",
            Self::FileSystemError {
                ..
            }
            | Self::IoError(_) => "FilesystemError",
            Self::TemplateError {
                ..
            } => "TemplateError",
            Self::ProjectConfigError {
                ..
            }
            | Self::TomlError(_) => "ProjectConfigError",
            Self::RegistryConfigError {
                ..
            } => "RegistryConfigError",
            Self::ConfigError {
                ..
            } => "ConfigError",
            Self::Other {
                ..
            } => "Error",
        }
    }
}

impl Clone for ScaffoldError {
    fn clone(&self) -> Self {
        match self {
            Self::UnknownBundle {
                project,
                bundle,
                origin,
                hint,
            } => Self::UnknownBundle {
                project: project.clone(),
                bundle: bundle.clone(),
                origin: origin.clone(),
                hint: hint.clone(),
            },
            Self::RegistryCycle {
                project,
                chain,
            } => Self::RegistryCycle {
                project: project.clone(),
                chain: chain.clone(),
            },
            Self::VersionConflict {
                project,
                bundle,
                first,
                second,
            } => Self::VersionConflict {
                project: project.clone(),
                bundle: bundle.clone(),
                first: first.clone(),
                second: second.clone(),
            },
            Self::MissingVersion {
                project,
                bundle,
                artifact,
            } => Self::MissingVersion {
                project: project.clone(),
                bundle: bundle.clone(),
                artifact: artifact.clone(),
            },
            Self::MalformedManifest {
                path,
                reason,
            } => Self::MalformedManifest {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
                reason,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::TemplateError {
                reason,
            } => Self::TemplateError {
                reason: reason.clone(),
            },
            Self::ProjectConfigError {
                file,
                reason,
            } => Self::ProjectConfigError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::RegistryConfigError {
                reason,
            } => Self::RegistryConfigError {
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`ScaffoldError`] and adds optional details and a
/// suggestion for resolution. This is how the CLI presents errors to users.
///
/// # Display Format
///
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use scaffold_cli::core::{ErrorContext, ScaffoldError};
///
/// let context = ErrorContext::new(ScaffoldError::ConfigError {
///     message: "max-parallel must be positive".to_string(),
/// })
/// .with_suggestion("Set max-parallel to 1 or more in scaffold-config.toml");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ScaffoldError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: ScaffoldError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Find the first [`ScaffoldError`] anywhere in an error chain.
///
/// Library code wraps typed errors in `anyhow` context, so the typed error is
/// not necessarily the outermost one.
#[must_use]
pub fn find_scaffold_error(error: &anyhow::Error) -> Option<&ScaffoldError> {
    error.chain().find_map(|cause| cause.downcast_ref::<ScaffoldError>())
}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`ScaffoldError`] variants anywhere in the chain, [`std::io::Error`]
/// kinds and TOML syntax errors; everything else is reported with its full cause
/// chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(scaffold_error) = find_scaffold_error(&error) {
        return create_error_context(scaffold_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ScaffoldError::FileSystemError {
                    operation: "accessing".to_string(),
                    path: "unknown".to_string(),
                    reason: io_error.to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the project directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ScaffoldError::FileSystemError {
                    operation: "accessing".to_string(),
                    path: "unknown".to_string(),
                    reason: io_error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(ScaffoldError::ProjectConfigError {
            file: "scaffold.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and array separators");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ScaffoldError::Other {
        message,
    })
}

/// Map each [`ScaffoldError`] variant to an [`ErrorContext`] with tailored advice.
fn create_error_context(error: ScaffoldError) -> ErrorContext {
    match &error {
        ScaffoldError::UnknownBundle {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'scaffold registry list' to see the available bundle ids")
            .with_details("Requests and bundle implications may only name bundles defined in the registry"),

        ScaffoldError::RegistryCycle {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'scaffold registry validate' and remove one of the implications in the cycle")
            .with_details("Bundle implications must form a directed acyclic graph. This is a registry defect, not a project defect"),

        ScaffoldError::VersionConflict {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Keep a single version override for the bundle, or make all overrides agree")
            .with_details("Only one explicit version may be pinned per bundle in a project"),

        ScaffoldError::MissingVersion {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Request the bundle with an explicit version, e.g. { bundle = \"x\", version = \"1.0\" }"),

        ScaffoldError::MalformedManifest {
            path,
            ..
        } => {
            let suggestion = format!(
                "Restore the generated region markers in {path}, or delete the file to have it recreated"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("The generator never overwrites a manifest whose generated region it cannot locate")
        }

        ScaffoldError::FileSystemError {
            ..
        }
        | ScaffoldError::IoError(_) => ErrorContext::new(error)
            .with_suggestion("Check that the project directory is writable and the disk is not full"),

        ScaffoldError::TemplateError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the template syntax: variables use {{ var }}, control flow uses {% %}"),

        ScaffoldError::ProjectConfigError {
            ..
        }
        | ScaffoldError::TomlError(_) => ErrorContext::new(error)
            .with_suggestion("Fix the project file; see 'scaffold --help' for the expected format"),

        ScaffoldError::RegistryConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'scaffold registry validate' for a full report of registry problems"),

        ScaffoldError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check scaffold-config.toml or the path given with --config"),

        ScaffoldError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
