//! Error types for property backends.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can occur while resolving components or evaluating properties.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The component could not be resolved by name, synonym, registry ID or formula.
    #[error(
        "Could not find component '{component}' in the {backend} database. \
         Try searching with the 'search_components' tool."
    )]
    ComponentNotFound {
        /// The component as given by the caller.
        component: String,
        /// Name of the backend that was asked.
        backend: &'static str,
    },

    /// The state point is not physically meaningful.
    #[error("Invalid state point: {message}")]
    InvalidState {
        /// Description of what's wrong.
        message: String,
    },

    /// A correlation produced a non-finite result.
    #[error("Failed to evaluate {property} for {component}: {message}")]
    Evaluation {
        /// Property being evaluated.
        property: String,
        /// Component being evaluated.
        component: String,
        /// Description of the failure.
        message: String,
    },

    /// A compound database file could not be read.
    #[error("Failed to read compound database: {path}")]
    DatabaseRead {
        /// Path to the database file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A compound database record is incomplete or inconsistent.
    #[error("Invalid compound record at line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number in the source file.
        line: u64,
        /// Description of what's wrong.
        message: String,
    },
}

impl BackendError {
    /// Creates a component-not-found error.
    #[must_use]
    pub fn not_found(component: &str, backend: &'static str) -> Self {
        Self::ComponentNotFound {
            component: component.to_string(),
            backend,
        }
    }

    /// Creates an invalid state error.
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}
