//! Typed resource access for the payment API.
//!
//! This module provides:
//!
//! - **[`Resource`] trait**: A record type plus the table of operations it supports
//! - **[`ResourceClient<R>`]**: Create, retrieve, update, delete and list for one resource type
//! - **[`ListIter<R>`]**: Lazy, cursor-driven iteration over list results
//! - **[`Params`] / [`ListParams`]**: Parameter blocks shared by every resource
//! - **Path building**: Per-operation path tables with escaped IDs
//! - **[`ResourceError`]**: Error type for resource operations
//!
//! Individual resources (Product, Plan, etc.) are implemented in the
//! [`resources`] submodule.
//!
//! # Example
//!
//! ```rust,ignore
//! use payment_portal::rest::resources::{Plan, PlanListParams};
//! use payment_portal::rest::{ListParams, ResourceClient};
//! use payment_portal::{ApiKey, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("sk_test_123")?)
//!     .build()?;
//! let plans = ResourceClient::<Plan>::from_config(&config)?;
//!
//! // Fetch a single plan
//! let plan = plans.get("wobscale-monthly", None).await?;
//!
//! // Walk every plan, 20 per request
//! let mut iter = plans.list(&PlanListParams {
//!     list: ListParams { limit: Some(20), ..Default::default() },
//!     ..Default::default()
//! });
//! while let Some(plan) = iter.next().await {
//!     println!("{}", plan?.id);
//! }
//!
//! // Delete
//! plans.delete("wobscale-monthly", None).await?;
//! ```

mod errors;
mod iter;
mod list;
mod params;
mod path;
mod resource;

pub mod resources;

// Public exports
pub use errors::ResourceError;
pub use iter::ListIter;
pub use list::{List, ListMeta};
pub use params::{ListParams, ListParamsContainer, Params, ParamsContainer};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{Resource, ResourceClient};
