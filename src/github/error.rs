//! Error types exposed by the collection pipeline.

use thiserror::Error;

/// Errors surfaced while loading configuration, talking to GitHub, or
/// reading and writing the tabular data files.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectError {
    /// The authentication token was missing or blank.
    #[error("personal access token is required (set RISR_TOKEN, GITHUB_PAT, or --token)")]
    MissingToken,

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A repository category outside the supported set was requested.
    #[error("'{category}' is an unsupported repository type (expected starter, capstone, or test)")]
    UnsupportedCategory {
        /// The rejected category string.
        category: String,
    },

    /// A GraphQL response did not have the shape this crate requests.
    #[error("unsupported response shape for {operation}: {message}")]
    UnsupportedResponse {
        /// The query the response belongs to.
        operation: String,
        /// Decoder detail naming the missing or mistyped field.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A required input file does not exist.
    #[error("required input file '{path}' does not exist")]
    MissingInput {
        /// Path of the missing file.
        path: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// A CSV file could not be read or written.
    #[error("CSV error in '{path}': {message}")]
    Csv {
        /// File being processed.
        path: String,
        /// Error detail from the CSV reader or writer.
        message: String,
    },
}

impl CollectError {
    /// Builds a [`CollectError::UnsupportedResponse`] for the given query.
    pub(crate) fn unsupported_response(operation: &str, error: &serde_json::Error) -> Self {
        Self::UnsupportedResponse {
            operation: operation.to_owned(),
            message: error.to_string(),
        }
    }
}
