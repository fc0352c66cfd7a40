//! HTTP transport for the payment API.
//!
//! This module provides [`HttpBackend`], the production [`Backend`] built on
//! `reqwest`, with optional retries governed by a [`RetryPolicy`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::clients::backend::Backend;
use crate::clients::errors::TransportError;
use crate::clients::form::FormValues;
use crate::clients::http_request::{HttpMethod, RequestOptions};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiBaseUrl, ApiKey, ClientConfig, RetryPolicy};
use crate::error::ConfigError;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

const IDEMPOTENCY_KEY_LEN: usize = 32;

/// HTTP backend for making requests to the payment API.
///
/// The backend handles:
/// - URL construction from the configured API base
/// - Default headers including User-Agent and the pinned API version
/// - Bearer authentication with the key passed to each call
/// - Query-string parameters for GET/DELETE, form bodies for POST
/// - Optional retries for transport failures, 409, 429 and 5xx responses
///
/// Every response is returned as-is, whatever its status.
///
/// # Thread Safety
///
/// `HttpBackend` is `Send + Sync`; share it behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use payment_portal::clients::HttpBackend;
/// use payment_portal::{ApiKey, ClientConfig};
///
/// let config = ClientConfig::builder()
///     .api_key(ApiKey::new("sk_test_123").unwrap())
///     .build()
///     .unwrap();
///
/// let backend = HttpBackend::new(&config).unwrap();
/// assert_eq!(backend.api_base().as_ref(), "https://api.stripe.com/v1");
/// ```
#[derive(Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_base: ApiBaseUrl,
    default_headers: HashMap<String, String>,
    retry: RetryPolicy,
}

// Verify HttpBackend is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpBackend>();
};

impl HttpBackend {
    /// Creates a backend from the given configuration.
    ///
    /// The API key in `config` is not captured: each call is authenticated
    /// with the key it is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying HTTP client cannot
    /// be created (e.g. TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Payment Portal Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(version) = config.api_version() {
            default_headers.insert("Stripe-Version".to_string(), version.to_string());
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_base: config.api_base().clone(),
            default_headers,
            retry: *config.retry(),
        })
    }

    /// Returns the API base URL requests are sent to.
    #[must_use]
    pub const fn api_base(&self) -> &ApiBaseUrl {
        &self.api_base
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    async fn send_once(
        &self,
        method: HttpMethod,
        url: &str,
        key: &ApiKey,
        form: &FormValues,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (name, value) in &self.default_headers {
            req_builder = req_builder.header(name, value);
        }
        req_builder = req_builder.bearer_auth(key.as_ref());
        for (name, value) in options.headers() {
            req_builder = req_builder.header(name, value);
        }

        req_builder = if method.uses_query_string() {
            if form.is_empty() {
                req_builder
            } else {
                req_builder.query(form.pairs())
            }
        } else {
            req_builder.form(form.pairs())
        };

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Whether an outcome is worth another attempt.
    fn should_retry(outcome: &Result<HttpResponse, TransportError>) -> bool {
        match outcome {
            Err(_) => true,
            Ok(response) => matches!(response.code, 409 | 429 | 500..=599),
        }
    }

    /// Calculates the wait before the next attempt.
    ///
    /// Only a 429 response's `Retry-After` is honoured, capped at the
    /// policy's `max_delay`; everything else waits the policy's fixed delay.
    fn retry_delay(&self, outcome: &Result<HttpResponse, TransportError>) -> Duration {
        match outcome {
            Ok(response) if response.code == 429 => response
                .retry_after()
                .map_or(self.retry.delay, |hint| hint.min(self.retry.max_delay)),
            _ => self.retry.delay,
        }
    }

    fn generate_idempotency_key() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(IDEMPOTENCY_KEY_LEN)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn call_raw(
        &self,
        method: HttpMethod,
        path: &str,
        key: &ApiKey,
        form: &FormValues,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.api_base.join(path);

        // DELETE is at-most-once.
        let max_attempts = if method == HttpMethod::Delete {
            1
        } else {
            self.retry.max_attempts()
        };

        let mut options = options.clone();
        if method == HttpMethod::Post && max_attempts > 1 && options.idempotency_key.is_none() {
            options.idempotency_key = Some(Self::generate_idempotency_key());
        }

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let outcome = self.send_once(method, &url, key, form, &options).await;

            match &outcome {
                Ok(response) => tracing::debug!(
                    method = %method,
                    path,
                    status = response.code,
                    request_id = response.request_id().unwrap_or("-"),
                    attempt,
                    "Payment API request completed"
                ),
                Err(error) => tracing::debug!(
                    method = %method,
                    path,
                    attempt,
                    error = %error,
                    "Payment API request failed"
                ),
            }

            if attempt >= max_attempts || !Self::should_retry(&outcome) {
                return outcome;
            }

            let delay = self.retry_delay(&outcome);
            tracing::warn!(
                "Retrying {} {} (attempt {} of {}) in {:?}",
                method,
                path,
                attempt + 1,
                max_attempts,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiVersion;

    fn config() -> ClientConfig {
        ClientConfig::builder()
            .api_key(ApiKey::new("sk_test_123").unwrap())
            .build()
            .unwrap()
    }

    fn response(code: u16, retry_after: Option<&str>) -> HttpResponse {
        let mut headers = HashMap::new();
        if let Some(value) = retry_after {
            headers.insert("retry-after".to_string(), vec![value.to_string()]);
        }
        HttpResponse::new(code, headers, "")
    }

    #[test]
    fn test_user_agent_header_format() {
        let backend = HttpBackend::new(&config()).unwrap();

        let user_agent = backend.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Payment Portal Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("sk_test_123").unwrap())
            .user_agent_prefix("Portal/1.0")
            .build()
            .unwrap();
        let backend = HttpBackend::new(&config).unwrap();

        let user_agent = backend.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Portal/1.0 | "));
    }

    #[test]
    fn test_accept_header_is_json() {
        let backend = HttpBackend::new(&config()).unwrap();
        assert_eq!(
            backend.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_version_header_only_when_pinned() {
        let backend = HttpBackend::new(&config()).unwrap();
        assert!(backend.default_headers().get("Stripe-Version").is_none());

        let pinned = ClientConfig::builder()
            .api_key(ApiKey::new("sk_test_123").unwrap())
            .api_version(ApiVersion::new(2018, 2, 28).unwrap())
            .build()
            .unwrap();
        let backend = HttpBackend::new(&pinned).unwrap();
        assert_eq!(
            backend.default_headers().get("Stripe-Version"),
            Some(&"2018-02-28".to_string())
        );
    }

    #[test]
    fn test_default_headers_never_carry_the_key() {
        let backend = HttpBackend::new(&config()).unwrap();
        assert!(backend
            .default_headers()
            .values()
            .all(|v| !v.contains("sk_test_123")));
    }

    #[test]
    fn test_should_retry_statuses() {
        for code in [409, 429, 500, 502, 503] {
            assert!(HttpBackend::should_retry(&Ok(response(code, None))));
        }
        for code in [200, 400, 401, 402, 404] {
            assert!(!HttpBackend::should_retry(&Ok(response(code, None))));
        }
        assert!(HttpBackend::should_retry(&Err(TransportError::new("reset"))));
    }

    #[test]
    fn test_retry_delay_honours_retry_after_only_for_429() {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("sk_test_123").unwrap())
            .retry(RetryPolicy::new(2, Duration::from_millis(10)))
            .build()
            .unwrap();
        let backend = HttpBackend::new(&config).unwrap();

        assert_eq!(
            backend.retry_delay(&Ok(response(429, Some("3")))),
            Duration::from_secs(3)
        );
        assert_eq!(
            backend.retry_delay(&Ok(response(500, Some("3")))),
            Duration::from_millis(10)
        );
        assert_eq!(
            backend.retry_delay(&Ok(response(429, None))),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn test_retry_after_hint_is_capped() {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("sk_test_123").unwrap())
            .retry(
                RetryPolicy::new(2, Duration::from_millis(10))
                    .with_max_delay(Duration::from_secs(2)),
            )
            .build()
            .unwrap();
        let backend = HttpBackend::new(&config).unwrap();

        assert_eq!(
            backend.retry_delay(&Ok(response(429, Some("86400")))),
            Duration::from_secs(2)
        );
        assert_eq!(
            backend.retry_delay(&Ok(response(429, Some("1.5")))),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_unrepresentable_retry_after_falls_back_to_delay() {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("sk_test_123").unwrap())
            .retry(RetryPolicy::new(2, Duration::from_millis(10)))
            .build()
            .unwrap();
        let backend = HttpBackend::new(&config).unwrap();

        for value in ["1e300", "inf", "NaN", "-1"] {
            assert_eq!(
                backend.retry_delay(&Ok(response(429, Some(value)))),
                Duration::from_millis(10),
                "Retry-After: {value}"
            );
        }
    }

    #[test]
    fn test_generated_idempotency_keys_are_unique() {
        let a = HttpBackend::generate_idempotency_key();
        let b = HttpBackend::generate_idempotency_key();

        assert_eq!(a.len(), IDEMPOTENCY_KEY_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
