//! Parameter blocks shared by every resource.
//!
//! Resource-specific params structs embed [`Params`] (or [`ListParams`])
//! with `#[serde(flatten)]` and expose it through [`ParamsContainer`] (or
//! [`ListParamsContainer`]). Fields marked `#[serde(skip)]` travel as headers
//! or steer the client; everything else is form-encoded.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::clients::RequestOptions;

/// Common create/update parameters.
///
/// # Example
///
/// ```rust
/// use payment_portal::rest::Params;
///
/// let mut params = Params::default();
/// params.add_metadata("user_id", "42");
/// params.add_expand("customer");
/// params.idempotency_key = Some("signup-42".to_string());
///
/// let options = params.request_options();
/// assert_eq!(options.idempotency_key.as_deref(), Some("signup-42"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Params {
    /// Arbitrary key/value pairs stored on the resource.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    /// Related objects to expand inline in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
    /// Sent as the `Idempotency-Key` header.
    #[serde(skip)]
    pub idempotency_key: Option<String>,
    /// Sent as the `Stripe-Account` header.
    #[serde(skip)]
    pub stripe_account: Option<String>,
}

impl Params {
    /// Adds a metadata entry, replacing any previous value for `key`.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Requests that a related object be expanded.
    pub fn add_expand(&mut self, field: impl Into<String>) {
        self.expand.push(field.into());
    }

    /// Returns the header-carried options.
    #[must_use]
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            idempotency_key: self.idempotency_key.clone(),
            stripe_account: self.stripe_account.clone(),
        }
    }
}

/// Common list parameters.
///
/// `starting_after` and `ending_before` are cursors: the ID of an item to
/// page forwards or backwards from. Setting `ending_before` makes the
/// iterator walk backwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    /// Page size (the remote default applies when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Return items after this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    /// Return items before this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    /// Related objects to expand inline, e.g. `data.customer`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
    /// Fetch only the first page.
    #[serde(skip)]
    pub single: bool,
    /// Sent as the `Stripe-Account` header.
    #[serde(skip)]
    pub stripe_account: Option<String>,
}

impl ListParams {
    /// Returns `true` if the iterator should page backwards.
    #[must_use]
    pub const fn is_reverse(&self) -> bool {
        self.ending_before.is_some()
    }

    /// Returns the header-carried options.
    #[must_use]
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            idempotency_key: None,
            stripe_account: self.stripe_account.clone(),
        }
    }
}

/// A create/update params struct carrying a [`Params`] block.
pub trait ParamsContainer: Serialize + Send + Sync {
    /// Returns the common parameter block.
    fn params(&self) -> &Params;
}

/// A list params struct carrying a [`ListParams`] block.
pub trait ListParamsContainer: Serialize + Send + Sync {
    /// Returns the common list parameter block.
    fn list_params(&self) -> &ListParams;
}

impl ParamsContainer for Params {
    fn params(&self) -> &Params {
        self
    }
}

impl ListParamsContainer for ListParams {
    fn list_params(&self) -> &ListParams {
        self
    }
}
