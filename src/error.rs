//! Error types for the excerpt formatter.

use thiserror::Error;

/// Errors raised while configuring or constructing formatters.
///
/// Trimming itself never fails; every variant here belongs to configuration,
/// plugin lookup, or settings persistence.
#[derive(Debug, Error)]
pub enum ExcerptError {
    /// Settings are out of range or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No formatter is registered under the requested identifier.
    #[error("unknown formatter: {0}")]
    UnknownFormatter(String),

    /// The formatter cannot display the given field type.
    #[error("formatter {formatter} does not support field type {field_type}")]
    UnsupportedFieldType {
        /// Formatter identifier.
        formatter: String,
        /// Rejected field type.
        field_type: String,
    },

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from a file-backed settings store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExcerptError {
    /// Check if this error was caused by the caller's input rather than the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_)
                | Self::UnknownFormatter(_)
                | Self::UnsupportedFieldType { .. }
        )
    }
}

/// Convenience result alias for formatter operations.
pub type ExcerptResult<T> = Result<T, ExcerptError>;
