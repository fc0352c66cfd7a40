//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! settings are rejected before any client is built.
//!
//! # Example
//!
//! ```rust
//! use payment_portal::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a secret or restricted API key.")]
    EmptyApiKey,

    /// API key contains characters that cannot appear in an auth header.
    #[error("API key contains whitespace or control characters.")]
    MalformedApiKey,

    /// API base URL is invalid.
    #[error("Invalid API base URL '{url}'. Expected an http or https URL (e.g., 'https://api.stripe.com/v1').")]
    InvalidApiBase {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' (e.g., '2018-02-28').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to build HTTP client: {message}")]
    HttpClient {
        /// Reason reported by the HTTP stack.
        message: String,
    },
}
