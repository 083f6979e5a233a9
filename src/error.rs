//! Domain-specific error types for the sideload engine.
//!
//! Each component returns its own typed error ([`RegistryError`],
//! [`TemplateError`], [`InstallError`], [`HostError`]); operations that span
//! several components return the [`SideloadError`] aggregate. Command
//! handlers at the CLI boundary convert everything to [`anyhow::Error`] via
//! the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SideloadError
//! ├── Registry(RegistryError): addon paths, registry storage
//! ├── Template(TemplateError): placeholder validation, template I/O
//! ├── Install(InstallError):   writing into the host install root
//! └── Host(HostError):         host discovery and launching
//! ```
//!
//! "Already present" and "not present" are not errors: they are reported as
//! [`AddOutcome`](crate::registry::AddOutcome) and
//! [`RemoveOutcome`](crate::registry::RemoveOutcome) values.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the sideload engine.
#[derive(Error, Debug)]
pub enum SideloadError {
    /// Registry error (missing addon path, unreadable or unwritable storage).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Template error (placeholder missing or repeated, unreadable template).
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Installation error (target files could not be written).
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Host application error (not found, could not be launched).
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors that arise from registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Nothing exists at the path the user asked to register.
    #[error("path not found: {}", path.display())]
    NotFound {
        /// The normalized path that was checked.
        path: PathBuf,
    },

    /// The path contains a line break, which the one-path-per-line registry
    /// file cannot store.
    #[error("path contains a line break: {path:?}")]
    LineBreak {
        /// The normalized path that was rejected.
        path: String,
    },

    /// The registry file could not be read, parsed, or written.
    #[error("registry storage {}: {message}", path.display())]
    Storage {
        /// Location of the registry file.
        path: PathBuf,
        /// What was being attempted when the failure happened.
        message: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The current working directory is needed to resolve a relative path
    /// but could not be determined.
    #[error("cannot resolve relative path without a working directory")]
    WorkingDir(#[source] std::io::Error),
}

impl RegistryError {
    /// Build a [`RegistryError::Storage`] for `path`.
    pub(crate) fn storage(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Storage {
            path: path.into(),
            message: message.into(),
            source,
        }
    }
}

/// Errors that arise from template loading and validation.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// No line of the template consists of the placeholder marker.
    #[error("placeholder '{marker}' not found in template")]
    MissingPlaceholder {
        /// The marker that was searched for.
        marker: String,
    },

    /// The placeholder marker appears on more than one line.
    #[error("placeholder '{marker}' appears more than once (lines {first} and {second})")]
    DuplicatePlaceholder {
        /// The marker that was searched for.
        marker: String,
        /// 1-based line number of the first occurrence.
        first: usize,
        /// 1-based line number of the second occurrence.
        second: usize,
    },

    /// The template file could not be read.
    #[error("cannot read template {}", path.display())]
    Read {
        /// Path of the template file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while writing into the host install root.
#[derive(Error, Debug)]
pub enum InstallError {
    /// A target file or one of its parent directories could not be written.
    #[error("cannot write {}", path.display())]
    Write {
        /// The path being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An installed file exists but could not be read back for comparison.
    #[error("cannot inspect {}", path.display())]
    Inspect {
        /// The path being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from host discovery and launching.
#[derive(Error, Debug)]
pub enum HostError {
    /// No host installation was found.
    #[error("host application not found (searched: {})", format_searched(searched))]
    NotFound {
        /// Every location that was probed, in probe order.
        searched: Vec<PathBuf>,
    },

    /// An explicitly configured install root does not contain a known
    /// browser executable.
    #[error("no browser executable found in {}", root.display())]
    MissingExecutable {
        /// The configured install root.
        root: PathBuf,
    },

    /// The host executable could not be started.
    #[error("failed to launch {}", program.display())]
    Launch {
        /// The executable that was started.
        program: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "nothing".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
