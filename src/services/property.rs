//! Property search service
//!
//! Resolves the optional-field parameter bag from the search form into a
//! `PropertyFilter` and runs it against the repository. Parsing is
//! deliberately lenient: malformed numeric input coerces to 0 instead of
//! failing the request, an unparsable arrival date skips the date filter,
//! and a missing night count defaults to a one-night stay.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::repositories::PropertyRepository;
use crate::models::{ListParams, PagedResult, Property, PropertyFilter, StayWindow};

/// Fixed page length of the search results
pub const SEARCH_PAGE_LENGTH: u32 = 15;

/// Raw query parameters of the property search form.
///
/// Every field is optional; empty strings count as absent. `s` is the
/// pagination cursor (1-indexed page number).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertySearchRequest {
    #[serde(default, rename = "Keywords")]
    pub keywords: Option<String>,
    #[serde(default, rename = "ArrivalDate")]
    pub arrival_date: Option<String>,
    #[serde(default, rename = "Nights")]
    pub nights: Option<String>,
    #[serde(default, rename = "Bedrooms")]
    pub bedrooms: Option<String>,
    #[serde(default, rename = "Bathrooms")]
    pub bathrooms: Option<String>,
    #[serde(default, rename = "MinPrice")]
    pub min_price: Option<String>,
    #[serde(default, rename = "MaxPrice")]
    pub max_price: Option<String>,
    #[serde(default, rename = "s")]
    pub page: Option<String>,
}

impl PropertySearchRequest {
    /// Resolve the raw bag into filter predicates. Absent or empty fields
    /// produce no predicate at all.
    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            keywords: non_empty(&self.keywords),
            stay: self.stay(),
            min_bedrooms: non_empty(&self.bedrooms).map(|v| coerce_int(&v)),
            min_bathrooms: non_empty(&self.bathrooms).map(|v| coerce_int(&v)),
            min_price: non_empty(&self.min_price).map(|v| coerce_price(&v)),
            max_price: non_empty(&self.max_price).map(|v| coerce_price(&v)),
        }
    }

    /// The requested page, 1-indexed; malformed values fall back to 1.
    pub fn page(&self) -> u32 {
        non_empty(&self.page)
            .and_then(|v| v.parse().ok())
            .unwrap_or(1)
    }

    fn stay(&self) -> Option<StayWindow> {
        let raw = non_empty(&self.arrival_date)?;
        let arrival = parse_arrival(&raw)?;
        let nights = non_empty(&self.nights)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(1)
            .max(1);
        Some(StayWindow::from_arrival(arrival, nights))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Garbage coerces to 0, which as a `>= 0` threshold matches everything.
fn coerce_int(value: &str) -> i64 {
    value.parse().unwrap_or(0)
}

fn coerce_price(value: &str) -> f64 {
    value.trim_start_matches('$').parse().unwrap_or(0.0)
}

/// Accept ISO dates and the search form's day-first format.
fn parse_arrival(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .ok()
}

/// Property search service
pub struct PropertySearchService {
    repo: Arc<dyn PropertyRepository>,
}

impl PropertySearchService {
    pub fn new(repo: Arc<dyn PropertyRepository>) -> Self {
        Self { repo }
    }

    /// Run the search described by the request, paginated at the fixed
    /// page length. The full-page and partial (AJAX) renderings both go
    /// through here; only the response shape differs.
    pub async fn search(&self, request: &PropertySearchRequest) -> Result<PagedResult<Property>> {
        let filter = request.filter();
        let params = ListParams::new(request.page(), SEARCH_PAGE_LENGTH);
        self.repo.search(&filter, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pairs: &[(&str, &str)]) -> PropertySearchRequest {
        let mut req = PropertySearchRequest::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "Keywords" => req.keywords = value,
                "ArrivalDate" => req.arrival_date = value,
                "Nights" => req.nights = value,
                "Bedrooms" => req.bedrooms = value,
                "Bathrooms" => req.bathrooms = value,
                "MinPrice" => req.min_price = value,
                "MaxPrice" => req.max_price = value,
                "s" => req.page = value,
                _ => unreachable!(),
            }
        }
        req
    }

    #[test]
    fn test_empty_request_has_no_predicates() {
        let filter = PropertySearchRequest::default().filter();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_blank_fields_are_skipped_not_wildcards() {
        let filter = request(&[("Keywords", "  "), ("Bedrooms", "")]).filter();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_stay_window_from_arrival_and_nights() {
        let filter = request(&[("ArrivalDate", "2025-06-10"), ("Nights", "3")]).filter();
        let stay = filter.stay.unwrap();
        assert_eq!(stay.start, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(stay.end, NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());
    }

    #[test]
    fn test_day_first_arrival_format() {
        let filter = request(&[("ArrivalDate", "10-06-2025")]).filter();
        assert_eq!(
            filter.stay.unwrap().start,
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
        );
    }

    #[test]
    fn test_missing_nights_defaults_to_one() {
        let filter = request(&[("ArrivalDate", "2025-06-10")]).filter();
        let stay = filter.stay.unwrap();
        assert_eq!(stay.end, NaiveDate::from_ymd_opt(2025, 6, 11).unwrap());
    }

    #[test]
    fn test_unparsable_arrival_skips_date_filter() {
        let filter = request(&[("ArrivalDate", "next tuesday"), ("Nights", "2")]).filter();
        assert!(filter.stay.is_none());
    }

    #[test]
    fn test_bathrooms_resolves_as_minimum_threshold() {
        let filter = request(&[("Bathrooms", "2")]).filter();
        assert_eq!(filter.min_bathrooms, Some(2));
        assert!(filter.min_bedrooms.is_none());

        let filter = request(&[("Bathrooms", "tubs")]).filter();
        assert_eq!(filter.min_bathrooms, Some(0));
    }

    #[test]
    fn test_malformed_numbers_coerce_to_zero() {
        let filter = request(&[("Bedrooms", "lots"), ("MinPrice", "cheap")]).filter();
        assert_eq!(filter.min_bedrooms, Some(0));
        assert_eq!(filter.min_price, Some(0.0));
    }

    #[test]
    fn test_price_accepts_dollar_prefix() {
        let filter = request(&[("MaxPrice", "$450")]).filter();
        assert_eq!(filter.max_price, Some(450.0));
    }

    #[test]
    fn test_page_cursor_is_lenient() {
        assert_eq!(request(&[("s", "3")]).page(), 3);
        assert_eq!(request(&[("s", "junk")]).page(), 1);
        assert_eq!(PropertySearchRequest::default().page(), 1);
    }
}
