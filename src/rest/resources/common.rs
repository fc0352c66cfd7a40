//! Types shared by several resources.

use serde::{Deserialize, Serialize};

/// A related object that is an ID unless expanded.
///
/// Requesting `expand: ["customer"]` turns `"customer": "cus_1"` into the
/// full customer object; both shapes decode into this type.
///
/// # Example
///
/// ```rust
/// use payment_portal::rest::resources::{Customer, Expandable};
///
/// let id: Expandable<Customer> = serde_json::from_str(r#""cus_1""#).unwrap();
/// assert_eq!(id.id(), "cus_1");
/// assert!(id.as_object().is_none());
///
/// let full: Expandable<Customer> =
///     serde_json::from_str(r#"{"id":"cus_1","email":"a@example.com"}"#).unwrap();
/// assert_eq!(full.id(), "cus_1");
/// assert!(full.as_object().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    /// The related object's ID.
    Id(String),
    /// The related object itself.
    Object(Box<T>),
}

impl<T: crate::rest::Resource> Expandable<T> {
    /// Returns the related object's ID, expanded or not.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Object(object) => object.id(),
        }
    }

    /// Returns the expanded object, if it was expanded.
    #[must_use]
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Self::Id(_) => None,
            Self::Object(object) => Some(object),
        }
    }
}

/// Billing frequency of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInterval {
    /// Daily.
    Day,
    /// Weekly.
    Week,
    /// Monthly.
    Month,
    /// Yearly.
    Year,
}
