//! # Payment Portal
//!
//! The billing side of a subscription portal: a typed client for a
//! Stripe-style payment API, with cursor-based list pagination behind an
//! injectable transport.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the API key, base URL and API version
//! - A [`Backend`](clients::Backend) transport trait, with an async
//!   `reqwest` implementation and optional retries
//! - [`ResourceClient`](rest::ResourceClient): create, retrieve, update,
//!   delete and list for any [`Resource`](rest::Resource)
//! - Lazy [`ListIter`](rest::ListIter) pagination that distinguishes
//!   exhaustion from failure
//! - Product, plan, customer and subscription resources
//!
//! ## Quick Start
//!
//! ```rust
//! use payment_portal::{ApiKey, ClientConfig, RetryPolicy};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("sk_test_4eC39HqLyjWDarjtT1zdp7dc").unwrap())
//!     .api_version("2018-02-28".parse().unwrap())
//!     .retry(RetryPolicy::new(2, Duration::from_millis(500)))
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working With Resources
//!
//! ```rust,ignore
//! use payment_portal::rest::resources::{
//!     Customer, CustomerParams, Subscription, SubscriptionItemParams, SubscriptionParams,
//! };
//! use payment_portal::rest::ResourceClient;
//!
//! let customers = ResourceClient::<Customer>::from_config(&config)?;
//! let subscriptions = ResourceClient::<Subscription>::from_config(&config)?;
//!
//! let customer = customers
//!     .create(&CustomerParams {
//!         email: Some("someone@example.com".into()),
//!         source: Some(card_token),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let subscription = subscriptions
//!     .create(&SubscriptionParams {
//!         customer: Some(customer.id.clone()),
//!         items: vec![SubscriptionItemParams {
//!             plan: Some("wobscale-monthly".into()),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     })
//!     .await?;
//! ```
//!
//! ## Sharing a Transport
//!
//! ```rust,ignore
//! use payment_portal::clients::{Backend, HttpBackend};
//! use payment_portal::rest::resources::{Plan, Product};
//! use payment_portal::rest::ResourceClient;
//! use std::sync::Arc;
//!
//! let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config)?);
//! let plans = ResourceClient::<Plan>::new(backend.clone(), config.api_key().clone());
//! let products = ResourceClient::<Product>::new(backend, config.api_key().clone());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients are `Clone + Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Single attempt**: Resource clients never retry; only the transport
//!   does, and only when a [`RetryPolicy`] asks it to

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    ApiBaseUrl, ApiKey, ApiVersion, ClientConfig, ClientConfigBuilder, RetryPolicy,
};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    Backend, HttpBackend, HttpMethod, HttpResponse, RemoteApiError, RequestOptions,
    TransportError,
};

// Re-export resource client types
pub use rest::{ListIter, ResourceClient, ResourceError};
