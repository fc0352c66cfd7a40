//! Remote API version pinning.
//!
//! The payment API versions its wire format by release date. A client may pin
//! a version through the `Stripe-Version` header; when no version is pinned
//! the account's default version applies.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A dated remote API version such as `2018-02-28`.
///
/// Versions order chronologically, so callers can gate behavior on
/// `version >= "2018-02-05".parse()?`.
///
/// # Example
///
/// ```rust
/// use payment_portal::ApiVersion;
///
/// let version: ApiVersion = "2018-02-28".parse().unwrap();
/// assert_eq!(version.to_string(), "2018-02-28");
/// assert_eq!(version.year(), 2018);
///
/// assert!("2018-2-28".parse::<ApiVersion>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion {
    year: u16,
    month: u8,
    day: u8,
}

impl ApiVersion {
    /// Creates a version from its date components.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] if the month or day is out
    /// of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ConfigError> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(ConfigError::InvalidApiVersion {
                version: format!("{year:04}-{month:02}-{day:02}"),
            });
        }
        Ok(Self { year, month, day })
    }

    /// Returns the release year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the release month (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the release day of month.
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidApiVersion {
            version: s.to_string(),
        };

        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 || parts[0].len() != 4 || parts[1].len() != 2 || parts[2].len() != 2
        {
            return Err(invalid());
        }
        if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
            return Err(invalid());
        }

        let year = parts[0].parse().map_err(|_| invalid())?;
        let month = parts[1].parse().map_err(|_| invalid())?;
        let day = parts[2].parse().map_err(|_| invalid())?;

        Self::new(year, month, day).map_err(|_| invalid())
    }
}
