//! Error types shared across the Glimt workspace.

/// Errors that can occur while building query fragments or mapping
/// highlight snippets.
///
/// Marked `#[non_exhaustive]` so new variants can be added without a
/// breaking change.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed caller input (e.g. an empty field resolution table).
    ///
    /// Configuration errors fail fast and are never silently defaulted.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// A request or response document failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation.
        field: Option<String>,
        /// What went wrong.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (request document loading in the CLI).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type alias for Glimt operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Returns whether this error is a caller configuration problem.
    ///
    /// Configuration and validation errors are permanent: retrying the
    /// same request cannot succeed.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::Validation { .. })
    }
}
