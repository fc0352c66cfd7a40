//! Wire shape of a list page.

use serde::{Deserialize, Serialize};

/// Pagination state reported with each list page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    /// Whether more items exist past this page.
    #[serde(default)]
    pub has_more: bool,
    /// The collection path this page was served from.
    #[serde(default)]
    pub url: String,
    /// Total number of items, when the remote side was asked to include it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// One page of a list response: `{"object": "list", "data": [...], ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    /// The items on this page, in remote order.
    pub data: Vec<T>,
    /// Pagination state.
    #[serde(flatten)]
    pub meta: ListMeta,
}
