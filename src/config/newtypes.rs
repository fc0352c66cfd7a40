//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated payment API key.
///
/// Secret (`sk_`) and restricted (`rk_`) keys are both accepted; the key is
/// sent as a bearer token on every request.
///
/// # Security
///
/// The `Debug` implementation only reveals the key's mode prefix
/// (e.g. `ApiKey(sk_test_*****)`), never the secret part.
///
/// # Example
///
/// ```rust
/// use payment_portal::ApiKey;
///
/// let key = ApiKey::new("sk_test_4eC39HqLyjWDarjtT1zdp7dc").unwrap();
/// assert!(key.is_test_mode());
/// assert_eq!(format!("{:?}", key), "ApiKey(sk_test_*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty, or
    /// [`ConfigError::MalformedApiKey`] if it contains whitespace or control
    /// characters.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ConfigError::MalformedApiKey);
        }
        Ok(Self(key))
    }

    /// Returns `true` for keys issued for test mode.
    #[must_use]
    pub fn is_test_mode(&self) -> bool {
        self.0.starts_with("sk_test_") || self.0.starts_with("rk_test_")
    }

    /// Returns `true` for keys issued for live mode.
    #[must_use]
    pub fn is_live_mode(&self) -> bool {
        self.0.starts_with("sk_live_") || self.0.starts_with("rk_live_")
    }

    fn mode_prefix(&self) -> &str {
        ["sk_test_", "sk_live_", "rk_test_", "rk_live_"]
            .into_iter()
            .find(|prefix| self.0.starts_with(prefix))
            .unwrap_or("")
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({}*****)", self.mode_prefix())
    }
}

/// A validated base URL for the remote API (e.g. `https://api.stripe.com/v1`).
///
/// Resource paths such as `/products` are appended to this URL, so any
/// trailing slash is removed on construction.
///
/// # Example
///
/// ```rust
/// use payment_portal::ApiBaseUrl;
///
/// let url = ApiBaseUrl::new("http://localhost:12111/v1/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:12111/v1");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiBaseUrl {
    /// The production endpoint.
    pub const DEFAULT: &'static str = "https://api.stripe.com/v1";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBase`] if the URL lacks an `http` or
    /// `https` scheme, has no host, or carries a query or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidApiBase { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        if url.contains(['?', '#']) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a resource path (starting with `/`) onto this base.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.url)
        } else {
            format!("{}/{path}", self.url)
        }
    }
}

impl Default for ApiBaseUrl {
    fn default() -> Self {
        let url = Self::DEFAULT.to_string();
        Self {
            scheme_end: 5,
            host_start: 8,
            host_end: 22,
            url,
        }
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        let result = ApiKey::new("");
        assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_rejects_whitespace() {
        assert!(matches!(
            ApiKey::new("sk_test_abc def"),
            Err(ConfigError::MalformedApiKey)
        ));
        assert!(matches!(
            ApiKey::new("sk_test_abc\n"),
            Err(ConfigError::MalformedApiKey)
        ));
    }

    #[test]
    fn test_api_key_masks_value_in_debug() {
        let key = ApiKey::new("sk_live_verysecret").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(sk_live_*****)");

        let unknown = ApiKey::new("opaque-token").unwrap();
        assert_eq!(format!("{unknown:?}"), "ApiKey(*****)");
    }

    #[test]
    fn test_api_key_modes() {
        let test = ApiKey::new("sk_test_123").unwrap();
        assert!(test.is_test_mode());
        assert!(!test.is_live_mode());

        let live = ApiKey::new("rk_live_123").unwrap();
        assert!(live.is_live_mode());
        assert!(!live.is_test_mode());
    }

    #[test]
    fn test_api_base_default_matches_parsed_default() {
        let parsed = ApiBaseUrl::new(ApiBaseUrl::DEFAULT).unwrap();
        assert_eq!(ApiBaseUrl::default(), parsed);
        assert_eq!(parsed.host_name(), "api.stripe.com");
        assert_eq!(parsed.scheme(), "https");
    }

    #[test]
    fn test_api_base_trims_trailing_slash() {
        let url = ApiBaseUrl::new("https://api.example.com/v1/").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com/v1");
        assert_eq!(url.join("/products"), "https://api.example.com/v1/products");
        assert_eq!(url.join("plans"), "https://api.example.com/v1/plans");
    }

    #[test]
    fn test_api_base_with_port() {
        let url = ApiBaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_api_base_rejects_invalid_urls() {
        for bad in [
            "",
            "api.stripe.com",
            "ftp://api.stripe.com",
            "https://",
            "https:///v1",
            "https://api.stripe.com/v1?x=1",
        ] {
            assert!(
                matches!(ApiBaseUrl::new(bad), Err(ConfigError::InvalidApiBase { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
