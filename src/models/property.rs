//! Property model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A rental property listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier
    pub id: i64,
    /// Listing title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Nightly rate
    pub price_per_night: f64,
    /// Number of bedrooms
    pub bedrooms: i64,
    /// Number of bathrooms
    pub bathrooms: i64,
    /// Whether the property appears in the homepage featured block
    pub featured: bool,
    /// First day the property can be booked
    pub available_start: Option<NaiveDate>,
    /// Last day the property can be booked
    pub available_end: Option<NaiveDate>,
    /// Owning region, if assigned
    pub region_id: Option<i64>,
    /// Primary photo path
    pub photo: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Whether the property is available on the given day.
    ///
    /// Requires both availability bounds; the window is inclusive at both
    /// ends.
    pub fn is_available_on(&self, day: NaiveDate) -> bool {
        match (self.available_start, self.available_end) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }

    /// Whether the property is available today.
    pub fn is_available(&self) -> bool {
        self.is_available_on(Utc::now().date_naive())
    }
}

/// A requested stay, resolved from arrival date plus number of nights.
///
/// A property matches when its availability window fully contains the stay:
/// `available_start <= start` and `available_end >= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StayWindow {
    /// Build a stay window from an arrival date and a night count.
    pub fn from_arrival(arrival: NaiveDate, nights: i64) -> Self {
        Self {
            start: arrival,
            end: arrival + chrono::Duration::days(nights),
        }
    }
}

/// Resolved search filter for the property search.
///
/// Each `None` field is a no-op: the corresponding predicate is skipped
/// entirely, not turned into a wildcard match. Present fields compose as
/// logical AND.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    /// Case-insensitive partial match on the title
    pub keywords: Option<String>,
    /// Stay that must be fully contained in the availability window
    pub stay: Option<StayWindow>,
    /// Minimum bedroom count (inclusive)
    pub min_bedrooms: Option<i64>,
    /// Minimum bathroom count (inclusive)
    pub min_bathrooms: Option<i64>,
    /// Minimum nightly price (inclusive)
    pub min_price: Option<f64>,
    /// Maximum nightly price (inclusive)
    pub max_price: Option<f64>,
}

impl PropertyFilter {
    /// Whether any predicate is set.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_none()
            && self.stay.is_none()
            && self.min_bedrooms.is_none()
            && self.min_bathrooms.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}
