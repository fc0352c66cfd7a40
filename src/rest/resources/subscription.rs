//! Subscription resource implementation.
//!
//! Deleting a subscription cancels it; the returned record has status
//! `canceled`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::list::List;
use crate::rest::{
    ListParams, ListParamsContainer, Params, ParamsContainer, Resource, ResourceOperation,
    ResourcePath,
};

use super::common::Expandable;
use super::customer::Customer;
use super::plan::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    PastDue,
    Canceled,
    Unpaid,
    Incomplete,
    IncompleteExpired,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Returns `true` while the subscription is billable or in trial.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Trialing | Self::Active | Self::PastDue)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub id: String,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub customer: Option<Expandable<Customer>>,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub items: Option<List<SubscriptionItem>>,
    /// Set when the subscription has exactly one plan.
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub current_period_start: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub trial_start: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub trial_end: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub livemode: bool,
}

impl Subscription {
    /// Returns the plans of every item, in item order.
    #[must_use]
    pub fn plans(&self) -> Vec<&Plan> {
        self.items
            .iter()
            .flat_map(|items| items.data.iter())
            .filter_map(|item| item.plan.as_ref())
            .collect()
    }
}

impl Resource for Subscription {
    type Params = SubscriptionParams;
    type ListParams = SubscriptionListParams;

    const NAME: &'static str = "Subscription";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "/subscriptions",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "/subscriptions/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Update,
            &["id"],
            "/subscriptions/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "/subscriptions/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &[],
            "/subscriptions",
        ),
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

/// One line of a subscription create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionItemParams {
    /// Existing item to change (update only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    /// Remove the item identified by `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscriptionParams {
    #[serde(flatten)]
    pub params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SubscriptionItemParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prorate: Option<bool>,
    /// Payment source token to charge, replacing the customer's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Unix timestamp ending the trial early, or `"now"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<String>,
}

impl ParamsContainer for SubscriptionParams {
    fn params(&self) -> &Params {
        &self.params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscriptionListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
}

impl ListParamsContainer for SubscriptionListParams {
    fn list_params(&self) -> &ListParams {
        &self.list
    }
}
