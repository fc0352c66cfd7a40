//! Transport types for payment API communication.
//!
//! This module provides the layer underneath the typed resource clients:
//! the [`Backend`] seam, its production implementation over `reqwest`, the
//! form encoder for request parameters, and the error types raised while
//! talking to the remote service.
//!
//! # Overview
//!
//! - [`Backend`]: The injectable transport trait
//! - [`HttpBackend`]: The async HTTP implementation of [`Backend`]
//! - [`FormValues`]: Bracket-nested form encoding of parameters
//! - [`HttpResponse`]: A raw response (status, headers, body text)
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, DELETE)
//! - [`RequestOptions`]: Per-call headers (`Idempotency-Key`, `Stripe-Account`)
//! - [`TransportError`], [`RemoteApiError`], [`DecodeError`],
//!   [`InvalidRequestError`]: failure types
//!
//! # Example
//!
//! ```rust,ignore
//! use payment_portal::clients::{Backend, HttpBackend, HttpMethod, RequestOptions};
//! use payment_portal::{ApiKey, ClientConfig};
//! use serde_json::json;
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("sk_test_123").unwrap())
//!     .build()
//!     .unwrap();
//! let backend = HttpBackend::new(&config)?;
//!
//! let response = backend
//!     .call(
//!         HttpMethod::Get,
//!         "/products",
//!         config.api_key(),
//!         &json!({"limit": 3}),
//!         &RequestOptions::default(),
//!     )
//!     .await?;
//! println!("{} {}", response.code, response.body);
//! ```
//!
//! # Retry Behavior
//!
//! [`HttpBackend`] retries only when its [`RetryPolicy`](crate::RetryPolicy)
//! allows more than one attempt (the default allows one):
//!
//! - **Transport failures, 409, 5xx**: Retried after the policy's fixed delay
//! - **429 (Rate Limited)**: Retried after `Retry-After`, or the fixed delay
//! - **Other statuses**: Returned immediately
//! - **DELETE**: Never retried
//!
//! Retried POSTs carry a generated `Idempotency-Key` unless the caller set
//! one.

mod backend;
mod errors;
mod form;
mod http_client;
mod http_request;
mod http_response;

pub use backend::Backend;
pub use errors::{ApiErrorType, DecodeError, InvalidRequestError, RemoteApiError, TransportError};
pub use form::FormValues;
pub use http_client::{HttpBackend, SDK_VERSION};
pub use http_request::{HttpMethod, RequestOptions, RequestOptionsBuilder};
pub use http_response::HttpResponse;
