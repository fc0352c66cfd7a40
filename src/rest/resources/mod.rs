//! Billing resources.
//!
//! Each resource implements [`Resource`](crate::rest::Resource) and is used
//! through a [`ResourceClient`](crate::rest::ResourceClient). All four
//! support create, retrieve, update, delete and list.
//!
//! The wire format these types decode is fixed by the API version the
//! account (or [`ClientConfig::api_version`](crate::ClientConfig::api_version))
//! pins. Fields the remote side omits decode as `None` or empty, so the
//! short record a delete returns fits the same type.
//!
//! # Available Resources
//!
//! ## Product Resource
//!
//! ```rust,ignore
//! use payment_portal::rest::resources::{Product, ProductParams, ProductType};
//!
//! let products = ResourceClient::<Product>::from_config(&config)?;
//! let product = products
//!     .create(&ProductParams {
//!         name: Some("Hosting".into()),
//!         product_type: Some(ProductType::Service),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```
//!
//! ## Plan Resource
//!
//! ```rust,ignore
//! use payment_portal::rest::resources::{Plan, PlanListParams};
//!
//! let plans = ResourceClient::<Plan>::from_config(&config)?;
//! let active = plans
//!     .list(&PlanListParams { active: Some(true), ..Default::default() })
//!     .collect_all()
//!     .await?;
//! ```
//!
//! ## Customer Resource
//!
//! ```rust,ignore
//! use payment_portal::rest::resources::{Customer, CustomerParams};
//!
//! let customers = ResourceClient::<Customer>::from_config(&config)?;
//! let customer = customers
//!     .update("cus_123", &CustomerParams { source: Some(token), ..Default::default() })
//!     .await?;
//! ```
//!
//! ## Subscription Resource
//!
//! ```rust,ignore
//! use payment_portal::rest::resources::{Subscription, SubscriptionItemParams, SubscriptionParams};
//!
//! let subscriptions = ResourceClient::<Subscription>::from_config(&config)?;
//! let subscription = subscriptions
//!     .create(&SubscriptionParams {
//!         customer: Some(customer.id.clone()),
//!         items: vec![SubscriptionItemParams { plan: Some("monthly".into()), ..Default::default() }],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // Cancel
//! subscriptions.delete(&subscription.id, None).await?;
//! ```

mod common;
mod customer;
mod plan;
mod product;
mod subscription;

pub use common::{Expandable, PlanInterval};
pub use customer::{Customer, CustomerListParams, CustomerParams};
pub use plan::{Plan, PlanListParams, PlanParams};
pub use product::{Product, ProductListParams, ProductParams, ProductType};
pub use subscription::{
    Subscription, SubscriptionItem, SubscriptionItemParams, SubscriptionListParams,
    SubscriptionParams, SubscriptionStatus,
};
