//! HTTP response type returned by a [`Backend`](crate::clients::Backend).

use std::collections::HashMap;
use std::time::Duration;

/// A raw HTTP response from the payment API.
///
/// The body is kept as text: status interpretation and decoding belong to the
/// resource client, so a backend returns responses of every status unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    ///
    /// Header names are lower-cased so lookups are case-insensitive.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<String, Vec<String>>, (k, v)| {
                acc.entry(k.to_lowercase()).or_default().extend(v);
                acc
            });

        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Creates a `200 OK` response with a JSON body and no headers.
    #[must_use]
    pub fn ok_json(body: &serde_json::Value) -> Self {
        Self::new(200, HashMap::new(), body.to_string())
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Request-Id` header value, if present.
    ///
    /// Include this ID when reporting problems to the payment processor.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("request-id")
    }

    /// Returns the server's `Retry-After` hint, if present and numeric.
    ///
    /// Negative, non-finite and out-of-range values are ignored. The hint is
    /// not capped here; see [`RetryPolicy::max_delay`](crate::RetryPolicy).
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Returns `true` if the server replayed a stored result for a reused
    /// idempotency key.
    #[must_use]
    pub fn idempotent_replayed(&self) -> bool {
        self.header("idempotent-replayed")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}
