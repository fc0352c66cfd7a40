//! Error type for resource client operations.
//!
//! # Error Handling
//!
//! Every resource operation returns [`ResourceError`]:
//!
//! - **No response**: [`ResourceError::Transport`]
//! - **Non-2xx status**: [`ResourceError::Api`], carrying status and payload
//! - **Unexpected 2xx body**: [`ResourceError::Decode`]
//! - **Rejected before sending**: [`ResourceError::InvalidRequest`] or
//!   [`ResourceError::UnsupportedOperation`]
//!
//! # Example
//!
//! ```rust,ignore
//! use payment_portal::rest::ResourceError;
//!
//! match plans.get("gold", None).await {
//!     Ok(plan) => println!("Found: {:?}", plan.nickname),
//!     Err(ResourceError::Api(e)) if e.status == 404 => println!("no such plan"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{DecodeError, InvalidRequestError, RemoteApiError, TransportError};
use crate::rest::path::ResourceOperation;

/// Error type for resource operations.
///
/// `Clone`, so a [`ListIter`](crate::rest::ListIter) can yield an error and
/// keep it for [`err()`](crate::rest::ListIter::err).
///
/// # Example
///
/// ```rust
/// use payment_portal::clients::InvalidRequestError;
/// use payment_portal::rest::{ResourceError, ResourceOperation};
///
/// let error = ResourceError::from(InvalidRequestError::MissingId { resource: "Plan" });
/// assert_eq!(error.to_string(), "Plan ID cannot be empty.");
///
/// let error = ResourceError::UnsupportedOperation {
///     resource: "Plan",
///     operation: ResourceOperation::Update,
/// };
/// assert!(error.to_string().contains("update"));
/// ```
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    /// The request produced no HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote service answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] RemoteApiError),

    /// A 2xx response body did not match the resource type.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The request was rejected before it was sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// The resource type does not support this operation.
    #[error("{resource} does not support the {operation} operation")]
    UnsupportedOperation {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation that was attempted.
        operation: ResourceOperation,
    },
}

impl ResourceError {
    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.request_id.as_deref(),
            Self::Decode(e) => e.request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status of the response that caused this error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Decode(e) => Some(e.status),
            _ => None,
        }
    }

    /// Returns `true` if this error reports a missing resource (HTTP 404).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.status == 404)
    }
}
