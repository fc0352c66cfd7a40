//! Error types for talking to the payment API.
//!
//! Every error here is `Clone`, so a list iterator can hand an error to its
//! caller and still keep a copy for later inspection.
//!
//! - [`TransportError`]: connection, TLS, DNS or timeout failure
//! - [`RemoteApiError`]: the remote service answered with a non-2xx status
//! - [`DecodeError`]: a 2xx body did not match the expected shape
//! - [`InvalidRequestError`]: a request was rejected before it was sent
//!
//! # Example
//!
//! ```rust,ignore
//! use payment_portal::rest::ResourceError;
//!
//! match products.get("prod_123", None).await {
//!     Ok(product) => println!("{:?}", product.name),
//!     Err(ResourceError::Api(e)) if e.is_client_error() => {
//!         println!("rejected ({}): {}", e.status, e.message);
//!     }
//!     Err(ResourceError::Transport(e)) => println!("network: {e}"),
//!     Err(e) => println!("other: {e}"),
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::clients::http_response::HttpResponse;

/// A network-level failure: the request produced no HTTP response.
///
/// [`Backend::call`](crate::clients::Backend::call) also reports params it
/// cannot encode this way, before sending anything. Not retried by the
/// resource client.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Whether the failure was a timeout.
    pub timed_out: bool,
    #[source]
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error with no underlying cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: None,
        }
    }

    /// Creates a transport error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
            source: Some(Arc::new(source)),
        }
    }

    /// Marks this error as a timeout.
    #[must_use]
    pub fn timed_out(mut self) -> Self {
        self.timed_out = true;
        self
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let timed_out = error.is_timeout();
        let message = if timed_out {
            format!("Request timed out: {error}")
        } else {
            format!("Network error: {error}")
        };
        let err = Self::with_source(message, error);
        if timed_out {
            err.timed_out()
        } else {
            err
        }
    }
}

/// The `type` field of a remote error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    /// Failure on the remote side.
    ApiError,
    /// The remote side could not reach an upstream network.
    ApiConnectionError,
    /// The API key was missing or rejected.
    AuthenticationError,
    /// A card could not be charged.
    CardError,
    /// An idempotency key was reused with different parameters.
    IdempotencyError,
    /// The request had invalid parameters.
    InvalidRequestError,
    /// Too many requests hit the API too quickly.
    RateLimitError,
    /// A type this client does not know about.
    #[serde(other)]
    Unknown,
}

impl ApiErrorType {
    /// Returns the wire name of this error type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApiError => "api_error",
            Self::ApiConnectionError => "api_connection_error",
            Self::AuthenticationError => "authentication_error",
            Self::CardError => "card_error",
            Self::IdempotencyError => "idempotency_error",
            Self::InvalidRequestError => "invalid_request_error",
            Self::RateLimitError => "rate_limit_error",
            Self::Unknown => "unknown",
        }
    }

    const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::AuthenticationError,
            429 => Self::RateLimitError,
            400..=499 => Self::InvalidRequestError,
            500..=599 => Self::ApiError,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(rename = "type")]
    error_type: Option<ApiErrorType>,
    code: Option<String>,
    message: Option<String>,
    param: Option<String>,
    decline_code: Option<String>,
    doc_url: Option<String>,
}

/// The remote service answered with a non-success HTTP status.
///
/// Carries the HTTP status plus the structured error payload, so callers can
/// tell validation failures (4xx) from remote failures (5xx).
///
/// # Example
///
/// ```rust
/// use payment_portal::clients::{ApiErrorType, HttpResponse, RemoteApiError};
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(
///     400,
///     HashMap::new(),
///     r#"{"error":{"type":"invalid_request_error","message":"No such plan: gold","param":"plan"}}"#,
/// );
/// let error = RemoteApiError::from_response(&response);
///
/// assert_eq!(error.error_type, ApiErrorType::InvalidRequestError);
/// assert_eq!(error.param.as_deref(), Some("plan"));
/// assert!(error.is_client_error());
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Remote API error {status} ({error_type}): {message}")]
pub struct RemoteApiError {
    /// The HTTP status code.
    pub status: u16,
    /// The remote error category.
    pub error_type: ApiErrorType,
    /// Machine-readable error code, if provided.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// The request parameter implicated, if any.
    pub param: Option<String>,
    /// Card issuer decline code, for card errors.
    pub decline_code: Option<String>,
    /// Link to documentation about this error.
    pub doc_url: Option<String>,
    /// The `Request-Id` header of the failed response.
    pub request_id: Option<String>,
}

impl RemoteApiError {
    /// Builds an error from a non-2xx response.
    ///
    /// Falls back to the raw body (or a status-derived message) when the body
    /// is not a structured error payload.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.code;
        let request_id = response.request_id().map(ToString::to_string);

        if let Ok(ErrorEnvelope { error }) = serde_json::from_str(&response.body) {
            return Self {
                status,
                error_type: error
                    .error_type
                    .unwrap_or_else(|| ApiErrorType::from_status(status)),
                code: error.code,
                message: error
                    .message
                    .unwrap_or_else(|| format!("HTTP status {status}")),
                param: error.param,
                decline_code: error.decline_code,
                doc_url: error.doc_url,
                request_id,
            };
        }

        let raw = response.body.trim();
        Self {
            status,
            error_type: ApiErrorType::from_status(status),
            code: None,
            message: if raw.is_empty() {
                format!("HTTP status {status}")
            } else {
                raw.to_string()
            },
            param: None,
            decline_code: None,
            doc_url: None,
            request_id,
        }
    }

    /// Returns `true` for 4xx statuses (the request was at fault).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns `true` for 5xx statuses (the remote side failed).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

/// A success response whose body did not match the expected shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to decode {target} from response (status {status}): {message}")]
pub struct DecodeError {
    /// What was being decoded (e.g. "product", "product list").
    pub target: String,
    /// The HTTP status of the response.
    pub status: u16,
    /// The deserializer's message.
    pub message: String,
    /// The `Request-Id` header of the response.
    pub request_id: Option<String>,
}

/// A request rejected before it reached the transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// An operation that addresses a single resource was given an empty ID.
    #[error("{resource} ID cannot be empty.")]
    MissingId {
        /// The resource type name.
        resource: &'static str,
    },

    /// Parameters could not be form-encoded.
    #[error("Cannot encode request parameters: {reason}")]
    UnencodableParams {
        /// Why encoding failed.
        reason: String,
    },
}
