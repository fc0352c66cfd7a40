//! Customer resource implementation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{
    ListParams, ListParamsContainer, Params, ParamsContainer, Resource, ResourceOperation,
    ResourcePath,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Balance in the smallest currency unit; negative is credit.
    #[serde(default)]
    pub account_balance: Option<i64>,
    #[serde(default)]
    pub default_source: Option<String>,
    #[serde(default)]
    pub delinquent: Option<bool>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub livemode: bool,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: Option<bool>,
}

impl Resource for Customer {
    type Params = CustomerParams;
    type ListParams = CustomerListParams;

    const NAME: &'static str = "Customer";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "/customers"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "/customers/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Update,
            &["id"],
            "/customers/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "/customers/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/customers"),
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerParams {
    #[serde(flatten)]
    pub params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A payment source token (e.g. `tok_visa`) to attach as the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<i64>,
}

impl ParamsContainer for CustomerParams {
    fn params(&self) -> &Params {
        &self.params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ListParamsContainer for CustomerListParams {
    fn list_params(&self) -> &ListParams {
        &self.list
    }
}
