//! The transport seam between resource clients and the network.

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::form::FormValues;
use crate::clients::http_request::{HttpMethod, RequestOptions};
use crate::clients::http_response::HttpResponse;
use crate::config::ApiKey;

/// Performs HTTP exchanges with the payment API.
///
/// A backend returns the response for *any* HTTP status: deciding what a
/// non-2xx status means is the caller's job. Only failures that produced no
/// response at all are reported as [`TransportError`].
///
/// [`HttpBackend`](crate::clients::HttpBackend) is the production
/// implementation; tests substitute an in-memory fake.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use payment_portal::clients::{
///     Backend, FormValues, HttpMethod, HttpResponse, RequestOptions, TransportError,
/// };
/// use payment_portal::ApiKey;
/// use std::collections::HashMap;
///
/// struct Offline;
///
/// #[async_trait]
/// impl Backend for Offline {
///     async fn call_raw(
///         &self,
///         _method: HttpMethod,
///         _path: &str,
///         _key: &ApiKey,
///         _form: &FormValues,
///         _options: &RequestOptions,
///     ) -> Result<HttpResponse, TransportError> {
///         Err(TransportError::new("offline"))
///     }
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync {
    /// Performs one exchange with pre-encoded form values.
    ///
    /// `path` is relative to the configured API base and already has any ID
    /// substituted and escaped.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no HTTP response was received.
    async fn call_raw(
        &self,
        method: HttpMethod,
        path: &str,
        key: &ApiKey,
        form: &FormValues,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError>;

    /// Encodes `params` and performs one exchange.
    ///
    /// Resource clients encode their own params and report encoding failures
    /// as [`InvalidRequestError`](crate::clients::InvalidRequestError). This
    /// raw entry point has only [`TransportError`] to return.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no HTTP response was received. Params
    /// that do not encode to a map also yield a [`TransportError`], whose
    /// message starts with `Cannot encode request parameters` and whose
    /// source is the [`InvalidRequestError`](crate::clients::InvalidRequestError);
    /// in that case nothing is sent.
    async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        key: &ApiKey,
        params: &serde_json::Value,
        options: &RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        let form = FormValues::from_value(params)
            .map_err(|e| {
                TransportError::with_source(format!("Cannot encode request parameters: {e}"), e)
            })?;
        self.call_raw(method, path, key, &form, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Backend for Counting {
        async fn call_raw(
            &self,
            _method: HttpMethod,
            _path: &str,
            _key: &ApiKey,
            form: &FormValues,
            _options: &RequestOptions,
        ) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(200, HashMap::new(), form.encode()))
        }
    }

    fn key() -> ApiKey {
        ApiKey::new("sk_test_123").unwrap()
    }

    #[tokio::test]
    async fn test_call_encodes_params() {
        let backend = Counting::default();

        let response = backend
            .call(
                HttpMethod::Post,
                "/customers",
                &key(),
                &json!({"email": "a@b.c"}),
                &RequestOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(response.body, "email=a%40b.c");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unencodable_params_are_not_sent() {
        let backend = Counting::default();

        let error = backend
            .call(
                HttpMethod::Post,
                "/customers",
                &key(),
                &json!(["not", "a", "map"]),
                &RequestOptions::default(),
            )
            .await
            .unwrap_err();

        assert!(error.message.starts_with("Cannot encode request parameters"));
        assert!(!error.timed_out);
        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }
}
