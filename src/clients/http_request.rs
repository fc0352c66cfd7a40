//! Request-side types for the payment API transport.
//!
//! This module provides [`HttpMethod`] and the per-call [`RequestOptions`]
//! that a [`Backend`](crate::clients::Backend) turns into headers.

use std::fmt;

/// HTTP methods used by the payment API.
///
/// Updates are `POST`s to the resource path, so there is no `PUT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving and listing resources.
    Get,
    /// HTTP POST method for creating and updating resources.
    Post,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` if parameters travel in the query string rather than
    /// the request body.
    #[must_use]
    pub const fn uses_query_string(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options sent as headers rather than parameters.
///
/// # Example
///
/// ```rust
/// use payment_portal::clients::RequestOptions;
///
/// let options = RequestOptions::builder()
///     .idempotency_key("order-42")
///     .stripe_account("acct_123")
///     .build();
///
/// assert_eq!(options.idempotency_key.as_deref(), Some("order-42"));
/// assert!(!options.is_empty());
/// assert!(RequestOptions::default().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Sent as `Idempotency-Key`.
    pub idempotency_key: Option<String>,
    /// Sent as `Stripe-Account`, to act on behalf of a connected account.
    pub stripe_account: Option<String>,
}

impl RequestOptions {
    /// Creates a new builder for constructing `RequestOptions`.
    #[must_use]
    pub fn builder() -> RequestOptionsBuilder {
        RequestOptionsBuilder::default()
    }

    /// Returns `true` if no option is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.idempotency_key.is_none() && self.stripe_account.is_none()
    }

    /// Returns the header name/value pairs for the options that are set.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        let mut headers = Vec::new();
        if let Some(key) = self.idempotency_key.as_deref() {
            headers.push(("Idempotency-Key", key));
        }
        if let Some(account) = self.stripe_account.as_deref() {
            headers.push(("Stripe-Account", account));
        }
        headers
    }
}

/// Builder for [`RequestOptions`].
#[derive(Debug, Default)]
pub struct RequestOptionsBuilder {
    idempotency_key: Option<String>,
    stripe_account: Option<String>,
}

impl RequestOptionsBuilder {
    /// Sets the idempotency key.
    #[must_use]
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Sets the connected account to act on behalf of.
    #[must_use]
    pub fn stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }

    /// Builds the [`RequestOptions`]. Empty strings count as unset.
    #[must_use]
    pub fn build(self) -> RequestOptions {
        RequestOptions {
            idempotency_key: self.idempotency_key.filter(|k| !k.is_empty()),
            stripe_account: self.stripe_account.filter(|a| !a.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_query_string_methods() {
        assert!(HttpMethod::Get.uses_query_string());
        assert!(HttpMethod::Delete.uses_query_string());
        assert!(!HttpMethod::Post.uses_query_string());
    }

    #[test]
    fn test_options_headers_only_include_set_values() {
        let options = RequestOptions::builder().stripe_account("acct_1").build();
        assert_eq!(options.headers(), vec![("Stripe-Account", "acct_1")]);

        assert!(RequestOptions::default().headers().is_empty());
    }

    #[test]
    fn test_builder_drops_empty_values() {
        let options = RequestOptions::builder()
            .idempotency_key("")
            .stripe_account("")
            .build();
        assert!(options.is_empty());
    }
}
