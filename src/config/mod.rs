//! Configuration types for the payment API client.
//!
//! This module replaces any process-wide default key or backend: every
//! [`ResourceClient`](crate::rest::ResourceClient) is built from an explicit
//! [`ClientConfig`].
//!
//! # Overview
//!
//! - [`ClientConfig`]: The main configuration struct holding all client settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`ApiBaseUrl`]: A validated base URL for the remote API
//! - [`ApiVersion`]: The dated remote API version to pin
//! - [`RetryPolicy`]: Transport-level retry settings
//!
//! # Example
//!
//! ```rust
//! use payment_portal::{ApiKey, ClientConfig, RetryPolicy};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("sk_test_123").unwrap())
//!     .api_version("2018-02-28".parse().unwrap())
//!     .retry(RetryPolicy::new(2, Duration::from_millis(250)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retry().max_retries, 2);
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiBaseUrl, ApiKey};
pub use version::ApiVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(80);

/// Default wait between retry attempts when the server gives no hint.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on a server-supplied `Retry-After` wait.
pub const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Retry settings applied by the HTTP transport.
///
/// The resource client itself never retries; a policy with
/// `max_retries == 0` (the default) makes every call a single attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of additional attempts after the first one.
    pub max_retries: u32,
    /// Wait between attempts when no `Retry-After` header is present.
    pub delay: Duration,
    /// Longest wait a `Retry-After` hint may impose.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given retry count and delay.
    #[must_use]
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            max_delay: DEFAULT_MAX_RETRY_DELAY,
        }
    }

    /// Sets the cap applied to `Retry-After` hints.
    #[must_use]
    pub const fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, DEFAULT_RETRY_DELAY)
    }

    /// Total number of attempts this policy allows.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Configuration for talking to the payment API.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use payment_portal::{ApiKey, ApiBaseUrl, ClientConfig};
///
/// let config = ClientConfig::builder()
///     .api_key(ApiKey::new("sk_test_123").unwrap())
///     .api_base(ApiBaseUrl::new("http://localhost:12111/v1").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_base().as_ref(), "http://localhost:12111/v1");
/// assert!(config.api_version().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_key: ApiKey,
    api_base: ApiBaseUrl,
    api_version: Option<ApiVersion>,
    retry: RetryPolicy,
    timeout: Duration,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &ApiBaseUrl {
        &self.api_base
    }

    /// Returns the pinned API version, if any.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the transport retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `api_key` is required. Everything else has a default:
///
/// - `api_base`: [`ApiBaseUrl::DEFAULT`]
/// - `api_version`: `None` (account default)
/// - `retry`: [`RetryPolicy::none()`]
/// - `timeout`: [`DEFAULT_TIMEOUT`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<ApiKey>,
    api_base: Option<ApiBaseUrl>,
    api_version: Option<ApiVersion>,
    retry: Option<RetryPolicy>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn api_base(mut self, base: ApiBaseUrl) -> Self {
        self.api_base = Some(base);
        self
    }

    /// Pins the remote API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the transport retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(ClientConfig {
            api_key,
            api_base: self.api_base.unwrap_or_default(),
            api_version: self.api_version,
            retry: self.retry.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
