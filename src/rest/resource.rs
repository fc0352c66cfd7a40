//! Typed resource access.
//!
//! This module defines the [`Resource`] trait, implemented by each remote
//! record type, and [`ResourceClient`], which performs create, retrieve,
//! update, delete and list operations for one resource type over an
//! injected [`Backend`].
//!
//! # Implementing a Resource
//!
//! 1. Define a struct deriving `Deserialize`
//! 2. Define its params structs, embedding [`Params`](crate::rest::Params)
//!    and [`ListParams`](crate::rest::ListParams)
//! 3. Implement `Resource` with the path table of supported operations
//!
//! # Example
//!
//! ```rust,ignore
//! use payment_portal::rest::{ListParams, Params, Resource, ResourceOperation, ResourcePath};
//! use payment_portal::clients::HttpMethod;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! pub struct Coupon {
//!     pub id: String,
//!     pub percent_off: Option<f64>,
//! }
//!
//! impl Resource for Coupon {
//!     type Params = Params;
//!     type ListParams = ListParams;
//!
//!     const NAME: &'static str = "Coupon";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Retrieve, &["id"], "/coupons/{id}"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/coupons"),
//!     ];
//!
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! let coupons = ResourceClient::<Coupon>::from_config(&config)?;
//! let coupon = coupons.get("SUMMER", None).await?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::clients::{
    Backend, DecodeError, FormValues, HttpBackend, HttpMethod, HttpResponse, InvalidRequestError,
    RemoteApiError, RequestOptions,
};
use crate::config::{ApiKey, ClientConfig};
use crate::error::ConfigError;
use crate::rest::iter::ListIter;
use crate::rest::list::List;
use crate::rest::params::{ListParamsContainer, ParamsContainer};
use crate::rest::{build_path, get_path, ResourceError, ResourceOperation, ResourcePath};

/// A remote record type accessible through a [`ResourceClient`].
///
/// # Associated Types
///
/// - `Params`: create/update parameters (also accepted by retrieve and delete)
/// - `ListParams`: list filters and pagination
///
/// # Associated Constants
///
/// - `NAME`: The singular resource name (e.g., "Product")
/// - `PATHS`: The operations this resource supports
pub trait Resource: DeserializeOwned + Send + Sync + Sized + 'static {
    /// Parameters for create and update operations.
    type Params: ParamsContainer;

    /// Parameters for list operations.
    type ListParams: ListParamsContainer;

    /// The singular name of the resource (e.g., "Product").
    ///
    /// Used in error messages.
    const NAME: &'static str;

    /// Supported operations and their paths.
    const PATHS: &'static [ResourcePath];

    /// Returns the remote-assigned ID.
    fn id(&self) -> &str;
}

/// Performs typed operations for one resource type.
///
/// Holds the transport and the API key, and nothing else: every call builds
/// its own request, so a client can be cloned and shared freely across tasks.
/// The client never retries; see [`RetryPolicy`](crate::RetryPolicy) for
/// transport-level retries.
///
/// # Example
///
/// ```rust,ignore
/// use payment_portal::rest::resources::{Product, ProductParams};
/// use payment_portal::rest::ResourceClient;
///
/// let products = ResourceClient::<Product>::from_config(&config)?;
///
/// let created = products
///     .create(&ProductParams { name: Some("Pro".into()), ..Default::default() })
///     .await?;
/// let fetched = products.get(&created.id, None).await?;
/// assert_eq!(fetched.name, created.name);
/// ```
pub struct ResourceClient<R: Resource> {
    backend: Arc<dyn Backend>,
    key: ApiKey,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::NAME)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceClient<R> {
    /// Creates a client over an existing backend.
    ///
    /// Clients for different resources can share one backend.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, key: ApiKey) -> Self {
        Self {
            backend,
            key,
            _resource: PhantomData,
        }
    }

    /// Creates a client with its own [`HttpBackend`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let backend = HttpBackend::new(config)?;
        Ok(Self::new(Arc::new(backend), config.api_key().clone()))
    }

    /// Returns the API key used for this client's calls.
    #[must_use]
    pub const fn key(&self) -> &ApiKey {
        &self.key
    }

    /// Creates a resource.
    ///
    /// # Errors
    ///
    /// See [`ResourceError`].
    pub async fn create(&self, params: &R::Params) -> Result<R, ResourceError> {
        let (method, path) = Self::resolve(ResourceOperation::Create, None)?;
        let form = FormValues::from_serialize(params)?;
        self.execute(method, &path, &form, &params.params().request_options())
            .await
    }

    /// Fetches a resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::MissingId`] for an empty `id`, without
    /// calling the backend. See [`ResourceError`] for the rest.
    pub async fn get(&self, id: &str, params: Option<&R::Params>) -> Result<R, ResourceError> {
        self.by_id(ResourceOperation::Retrieve, id, params).await
    }

    /// Updates a resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::MissingId`] for an empty `id`, without
    /// calling the backend. See [`ResourceError`] for the rest.
    pub async fn update(&self, id: &str, params: &R::Params) -> Result<R, ResourceError> {
        self.by_id(ResourceOperation::Update, id, Some(params)).await
    }

    /// Deletes a resource by ID.
    ///
    /// Returns the remote record describing the deleted resource. Sent once;
    /// no layer retries a delete.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::MissingId`] for an empty `id`, without
    /// calling the backend. See [`ResourceError`] for the rest.
    pub async fn delete(&self, id: &str, params: Option<&R::Params>) -> Result<R, ResourceError> {
        self.by_id(ResourceOperation::Delete, id, params).await
    }

    /// Lists resources lazily.
    ///
    /// Nothing is sent until the iterator is first advanced. Pre-flight
    /// failures (unsupported operation, unencodable params) are yielded by
    /// the first advancement.
    #[must_use]
    pub fn list(&self, params: &R::ListParams) -> ListIter<R> {
        let list_params = params.list_params();
        let prepared = Self::resolve(ResourceOperation::List, None)
            .and_then(|_| FormValues::from_serialize(params).map_err(ResourceError::from));

        match prepared {
            Ok(form) => ListIter::new(
                self.clone(),
                form,
                list_params.request_options(),
                list_params.is_reverse(),
                list_params.single,
            ),
            Err(error) => ListIter::failed(self.clone(), error),
        }
    }

    /// Fetches one list page with the given (cursor-bearing) form values.
    pub(crate) async fn fetch_page(
        &self,
        form: &FormValues,
        options: &RequestOptions,
    ) -> Result<List<R>, ResourceError> {
        let (method, path) = Self::resolve(ResourceOperation::List, None)?;
        let response = self
            .backend
            .call_raw(method, &path, &self.key, form, options)
            .await?;
        Self::decode(&response, &format!("{} list", R::NAME))
    }

    async fn by_id(
        &self,
        operation: ResourceOperation,
        id: &str,
        params: Option<&R::Params>,
    ) -> Result<R, ResourceError> {
        let (method, path) = Self::resolve(operation, Some(id))?;
        let (form, options) = match params {
            Some(params) => (
                FormValues::from_serialize(params)?,
                params.params().request_options(),
            ),
            None => (FormValues::new(), RequestOptions::default()),
        };
        self.execute(method, &path, &form, &options).await
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        form: &FormValues,
        options: &RequestOptions,
    ) -> Result<R, ResourceError> {
        let response = self
            .backend
            .call_raw(method, path, &self.key, form, options)
            .await?;
        Self::decode(&response, R::NAME)
    }

    /// Looks up the path for `operation` and substitutes the ID.
    fn resolve(
        operation: ResourceOperation,
        id: Option<&str>,
    ) -> Result<(HttpMethod, String), ResourceError> {
        let mut ids: HashMap<&str, &str> = HashMap::new();
        if let Some(id) = id {
            ids.insert("id", id);
        }

        let available_ids: Vec<&str> = ids.keys().copied().collect();
        let path = get_path(R::PATHS, operation, &available_ids).ok_or(
            ResourceError::UnsupportedOperation {
                resource: R::NAME,
                operation,
            },
        )?;

        if id.is_some_and(str::is_empty) {
            return Err(InvalidRequestError::MissingId { resource: R::NAME }.into());
        }

        Ok((path.http_method, build_path(path.template, &ids)))
    }

    /// Maps a response to a value or the matching error.
    fn decode<T: DeserializeOwned>(response: &HttpResponse, target: &str) -> Result<T, ResourceError> {
        if !response.is_ok() {
            return Err(RemoteApiError::from_response(response).into());
        }

        serde_json::from_str(&response.body).map_err(|e| {
            DecodeError {
                target: target.to_string(),
                status: response.code,
                message: e.to_string(),
                request_id: response.request_id().map(ToString::to_string),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::TransportError;
    use crate::rest::{ListParams, Params};
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Widget {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        metadata: BTreeMap<String, String>,
    }

    #[derive(Debug, Default, Serialize)]
    struct WidgetParams {
        #[serde(flatten)]
        params: Params,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    }

    impl ParamsContainer for WidgetParams {
        fn params(&self) -> &Params {
            &self.params
        }
    }

    impl Resource for Widget {
        type Params = WidgetParams;
        type ListParams = ListParams;

        const NAME: &'static str = "Widget";
        const PATHS: &'static [ResourcePath] = &[
            ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "/widgets"),
            ResourcePath::new(HttpMethod::Get, ResourceOperation::Retrieve, &["id"], "/widgets/{id}"),
            ResourcePath::new(HttpMethod::Post, ResourceOperation::Update, &["id"], "/widgets/{id}"),
            ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/widgets"),
        ];

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[derive(Debug, Clone)]
    struct Call {
        method: HttpMethod,
        path: String,
        form: FormValues,
        options: RequestOptions,
    }

    #[derive(Default)]
    struct FakeBackend {
        responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeBackend {
        fn with(responses: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn call_raw(
            &self,
            method: HttpMethod,
            path: &str,
            _key: &ApiKey,
            form: &FormValues,
            options: &RequestOptions,
        ) -> Result<HttpResponse, TransportError> {
            self.calls.lock().unwrap().push(Call {
                method,
                path: path.to_string(),
                form: form.clone(),
                options: options.clone(),
            });
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("no scripted response")))
        }
    }

    fn client(backend: &Arc<FakeBackend>) -> ResourceClient<Widget> {
        ResourceClient::new(backend.clone(), ApiKey::new("sk_test_123").unwrap())
    }

    fn ok(body: serde_json::Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::ok_json(&body))
    }

    #[tokio::test]
    async fn test_create_posts_form_to_collection() {
        let backend = FakeBackend::with(vec![ok(json!({"id": "wid_1", "name": "Sprocket"}))]);
        let mut params = WidgetParams {
            name: Some("Sprocket".to_string()),
            ..WidgetParams::default()
        };
        params.params.add_metadata("color", "red");
        params.params.idempotency_key = Some("create-1".to_string());

        let widget = client(&backend).create(&params).await.unwrap();

        assert_eq!(widget.id, "wid_1");
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, HttpMethod::Post);
        assert_eq!(calls[0].path, "/widgets");
        assert_eq!(calls[0].form.get("name"), Some("Sprocket"));
        assert_eq!(calls[0].form.get("metadata[color]"), Some("red"));
        assert_eq!(calls[0].options.idempotency_key.as_deref(), Some("create-1"));
    }

    #[tokio::test]
    async fn test_get_escapes_id_into_path() {
        let backend = FakeBackend::with(vec![ok(json!({"id": "a/b"}))]);

        client(&backend).get("a/b", None).await.unwrap();

        assert_eq!(backend.calls()[0].path, "/widgets/a%2Fb");
        assert_eq!(backend.calls()[0].method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_empty_id_never_reaches_backend() {
        let backend = FakeBackend::with(vec![]);
        let widgets = client(&backend);

        let get = widgets.get("", None).await;
        let update = widgets.update("", &WidgetParams::default()).await;

        for result in [get, update] {
            assert!(matches!(
                result,
                Err(ResourceError::InvalidRequest(InvalidRequestError::MissingId {
                    resource: "Widget"
                }))
            ));
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_undeclared_operation_is_unsupported() {
        let backend = FakeBackend::with(vec![]);

        let result = client(&backend).delete("wid_1", None).await;

        assert!(matches!(
            result,
            Err(ResourceError::UnsupportedOperation {
                resource: "Widget",
                operation: ResourceOperation::Delete
            })
        ));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_2xx_is_api_error() {
        let backend = FakeBackend::with(vec![Ok(HttpResponse::new(
            400,
            HashMap::new(),
            r#"{"error":{"type":"invalid_request_error","message":"Missing name","param":"name"}}"#,
        ))]);

        let result = client(&backend).create(&WidgetParams::default()).await;

        match result {
            Err(ResourceError::Api(e)) => {
                assert_eq!(e.status, 400);
                assert_eq!(e.param.as_deref(), Some("name"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let backend = FakeBackend::with(vec![ok(json!({"name": "no id"}))]);

        let result = client(&backend).get("wid_1", None).await;

        match result {
            Err(ResourceError::Decode(e)) => {
                assert_eq!(e.target, "Widget");
                assert_eq!(e.status, 200);
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let backend = FakeBackend::with(vec![Err(TransportError::new("connection reset"))]);

        let result = client(&backend).get("wid_1", None).await;

        assert!(matches!(result, Err(ResourceError::Transport(_))));
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_lazy_and_pages_with_cursor() {
        let backend = FakeBackend::with(vec![
            ok(json!({"data": [{"id": "a"}, {"id": "b"}], "has_more": true, "url": "/v1/widgets"})),
            ok(json!({"data": [{"id": "c"}], "has_more": false, "url": "/v1/widgets"})),
        ]);
        let params = ListParams {
            limit: Some(2),
            ..ListParams::default()
        };

        let mut iter = client(&backend).list(&params);
        assert!(backend.calls().is_empty());

        let mut ids = Vec::new();
        while let Some(item) = iter.next().await {
            ids.push(item.unwrap().id);
        }

        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(iter.is_exhausted());
        assert!(iter.err().is_none());

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].form.get("starting_after").is_none());
        assert_eq!(calls[1].form.get("starting_after"), Some("b"));
        assert_eq!(calls[1].form.get("limit"), Some("2"));
    }

    #[test]
    fn test_client_is_clone_send_sync() {
        fn assert_traits<T: Clone + Send + Sync>() {}
        assert_traits::<ResourceClient<Widget>>();
    }
}
