//! Path tables for resource operations.
//!
//! Each resource type declares the operations it supports as a constant
//! table of [`ResourcePath`]s. The client looks an operation up with
//! [`get_path`] and fills in the template with [`build_path`]; an operation
//! missing from the table is unsupported.
//!
//! # Example
//!
//! ```rust
//! use payment_portal::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use payment_portal::clients::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Retrieve, &["id"], "/plans/{id}"),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "/plans"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Retrieve, &["id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("id", "gold/monthly");
//! assert_eq!(build_path(path.template, &ids), "/plans/gold%2Fmonthly");
//!
//! assert!(get_path(PATHS, ResourceOperation::Delete, &["id"]).is_none());
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::clients::HttpMethod;

/// Operations that can be performed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// POST to the collection path.
    Create,
    /// Fetch a single resource by ID (GET /resources/{id}).
    Retrieve,
    /// Update an existing resource (POST /resources/{id}).
    Update,
    /// DELETE on the record path; returns the deleted marker.
    Delete,
    /// List resources page by page (GET /resources).
    List,
}

impl ResourceOperation {
    /// The method an operation uses unless its path entry says otherwise.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Retrieve | Self::List => HttpMethod::Get,
            Self::Create | Self::Update => HttpMethod::Post,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Lower-case name, as used in log fields and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Retrieve => "retrieve",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path configuration for one resource operation.
///
/// Templates use `{name}` placeholders, e.g. `/customers/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// Method to send.
    pub http_method: HttpMethod,
    /// Operation served by this entry.
    pub operation: ResourceOperation,
    /// Required ID parameters in order (e.g., `["id"]`).
    pub ids: &'static [&'static str],
    /// The path template, relative to the API base.
    pub template: &'static str,
}

impl ResourcePath {
    /// Declares one entry of a resource's path table.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Number of placeholders the template needs.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when every placeholder has a value in `available_ids`.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Finds the entry for `operation` that uses the most of `available_ids`.
///
/// Among paths for `operation` whose required IDs are all available, the
/// most specific one (most IDs) wins. `None` means the resource does not
/// support the operation with these IDs.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Builds a path from a template by interpolating IDs.
///
/// Values are percent-encoded, so an ID can never change the path's shape.
/// Placeholders missing from `ids` are left as-is.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path(template: &str, ids: &HashMap<&str, &str>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    result
}

// Compile-time Send + Sync checks.
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: &[ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "/customers"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
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

    #[test]
    fn test_get_path_filters_by_operation() {
        let retrieve = get_path(PATHS, ResourceOperation::Retrieve, &["id"]).unwrap();
        assert_eq!(retrieve.http_method, HttpMethod::Get);
        assert_eq!(retrieve.template, "/customers/{id}");

        let delete = get_path(PATHS, ResourceOperation::Delete, &["id"]).unwrap();
        assert_eq!(delete.http_method, HttpMethod::Delete);

        let list = get_path(PATHS, ResourceOperation::List, &[]).unwrap();
        assert_eq!(list.template, "/customers");
    }

    #[test]
    fn test_get_path_returns_none_for_undeclared_operation() {
        assert!(get_path(PATHS, ResourceOperation::Update, &["id"]).is_none());
    }

    #[test]
    fn test_get_path_returns_none_when_ids_missing() {
        assert!(get_path(PATHS, ResourceOperation::Retrieve, &[]).is_none());
    }

    #[test]
    fn test_get_path_selects_most_specific_path() {
        const NESTED: &[ResourcePath] = &[
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::Retrieve,
                &["customer", "id"],
                "/customers/{customer}/sources/{id}",
            ),
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::Retrieve,
                &["id"],
                "/sources/{id}",
            ),
        ];

        let path = get_path(NESTED, ResourceOperation::Retrieve, &["customer", "id"]).unwrap();
        assert_eq!(path.template, "/customers/{customer}/sources/{id}");

        let path = get_path(NESTED, ResourceOperation::Retrieve, &["id"]).unwrap();
        assert_eq!(path.template, "/sources/{id}");
    }

    #[test]
    fn test_build_path_escapes_ids() {
        let mut ids = HashMap::new();
        ids.insert("id", "cus_1/../../charges?x=1");

        let path = build_path("/customers/{id}", &ids);
        assert_eq!(path, "/customers/cus_1%2F..%2F..%2Fcharges%3Fx%3D1");
    }

    #[test]
    fn test_build_path_leaves_missing_placeholders() {
        let ids = HashMap::new();
        assert_eq!(build_path("/customers/{id}", &ids), "/customers/{id}");
    }

    #[test]
    fn test_resource_operation_default_http_method() {
        assert_eq!(ResourceOperation::Create.default_http_method(), HttpMethod::Post);
        assert_eq!(ResourceOperation::Retrieve.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Update.default_http_method(), HttpMethod::Post);
        assert_eq!(ResourceOperation::Delete.default_http_method(), HttpMethod::Delete);
        assert_eq!(ResourceOperation::List.default_http_method(), HttpMethod::Get);
    }

    #[test]
    fn test_resource_operation_display() {
        assert_eq!(ResourceOperation::List.to_string(), "list");
        assert_eq!(ResourceOperation::Retrieve.to_string(), "retrieve");
    }
}
