//! Free-text query construction.

use geo_aid_geocoder_models::Domain;

/// Separator Nominatim understands as "where these two roads meet".
const INTERSECTION_SEPARATOR: &str = " & ";

/// Builds the query text for an intersection of two roads.
#[must_use]
pub fn intersection(road1: &str, road2: &str) -> String {
    format!("{road1}{INTERSECTION_SEPARATOR}{road2}")
}

/// Builds the query text for a street or highway name.
///
/// The name is passed through unchanged.
#[must_use]
pub fn by_name(name: &str) -> String {
    name.to_string()
}

/// A query plus the request parameters that depend on its domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text query, not yet percent-encoded.
    pub text: String,
    /// Maximum number of records to request.
    pub limit: u32,
    /// Whether to request the per-record address breakdown.
    pub address_details: bool,
}

impl SearchQuery {
    /// Creates a query using the limit and detail flag of `domain`.
    #[must_use]
    pub fn for_domain(domain: Domain, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: domain.result_limit(),
            address_details: domain.address_details(),
        }
    }
}
