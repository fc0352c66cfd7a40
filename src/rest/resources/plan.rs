//! Plan resource implementation.
//!
//! A plan sets the price, currency and billing interval of a product.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{
    ListParams, ListParamsContainer, Params, ParamsContainer, Resource, ResourceOperation,
    ResourcePath,
};

use super::common::{Expandable, PlanInterval};
use super::product::Product;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub active: Option<bool>,
    /// Price in the currency's smallest unit (e.g. cents).
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub interval: Option<PlanInterval>,
    #[serde(default)]
    pub interval_count: Option<u32>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub product: Option<Expandable<Product>>,
    #[serde(default)]
    pub trial_period_days: Option<u32>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub livemode: bool,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: Option<bool>,
}

impl Resource for Plan {
    type Params = PlanParams;
    type ListParams = PlanListParams;

    const NAME: &'static str = "Plan";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "/plans"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "/plans/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Update,
            &["id"],
            "/plans/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "/plans/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/plans"),
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanParams {
    #[serde(flatten)]
    pub params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<PlanInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// ID of the product this plan prices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<u32>,
}

impl ParamsContainer for PlanParams {
    fn params(&self) -> &Params {
        &self.params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl ListParamsContainer for PlanListParams {
    fn list_params(&self) -> &ListParams {
        &self.list
    }
}
