//! Road classification of raw geocoder records.
//!
//! Nominatim tags roads inconsistently across regions, so the highway rule
//! is intentionally loose: besides the OSM road categories it also accepts
//! any record whose display name mentions a highway, route, or state road.
//! The street rule has no such fallback.
//!
//! Records are kept in the order the service returned them. `importance`
//! is carried through but never used for sorting.

use geo_aid_geocoder_models::{ClassifiedResult, Domain, IntersectionResult, LocationRecord};
use thiserror::Error;

/// OSM categories accepted as streets (matched against `class` or `type`).
pub const STREET_CATEGORIES: &[&str] = &[
    "road",
    "street",
    "residential",
    "tertiary",
    "secondary",
    "primary",
    "path",
    "track",
    "service",
];

/// OSM categories accepted as highways (matched against `class` or `type`).
pub const HIGHWAY_CATEGORIES: &[&str] = &["motorway", "trunk", "primary", "secondary", "tertiary"];

/// Lower-case display-name fragments that mark a record as a highway.
pub const HIGHWAY_NAME_HINTS: &[&str] = &["highway", "route", "state road"];

/// No usable record survived classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The response was empty, or every record was filtered out or had
    /// invalid coordinates.
    #[error("No matches among {examined} record(s) ({invalid_coordinates} with invalid coordinates)")]
    NoMatches {
        /// Number of raw records looked at.
        examined: usize,
        /// Records that passed the filter but had unusable coordinates.
        invalid_coordinates: usize,
    },
}

/// Outcome of a successful classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<T = Vec<ClassifiedResult>> {
    /// What the search produced, in response order.
    pub results: T,
    /// Number of records kept in `results`. Never zero.
    pub kept: usize,
    /// Number of raw records looked at.
    pub examined: usize,
    /// Records that passed the filter but were dropped for unusable
    /// coordinates.
    pub invalid_coordinates: usize,
}

fn tagged_with(record: &LocationRecord, categories: &[&str]) -> bool {
    [record.class.as_deref(), record.kind.as_deref()]
        .into_iter()
        .flatten()
        .any(|tag| categories.contains(&tag))
}

/// Whether a record counts as a street.
#[must_use]
pub fn is_street(record: &LocationRecord) -> bool {
    tagged_with(record, STREET_CATEGORIES)
}

/// Whether a record counts as a highway.
#[must_use]
pub fn is_highway(record: &LocationRecord) -> bool {
    if tagged_with(record, HIGHWAY_CATEGORIES) {
        return true;
    }
    let name = record.display_name_or_empty().to_lowercase();
    HIGHWAY_NAME_HINTS.iter().any(|hint| name.contains(hint))
}

/// Whether `domain` keeps this record. Intersections keep everything.
#[must_use]
pub fn accepts(domain: Domain, record: &LocationRecord) -> bool {
    match domain {
        Domain::Intersection => true,
        Domain::Street => is_street(record),
        Domain::Highway => is_highway(record),
    }
}

/// Filters `records` for `domain` and maps the survivors to
/// [`ClassifiedResult`]s.
///
/// Records whose coordinates are missing or unparsable are dropped and
/// counted rather than admitted with NaN coordinates.
///
/// # Errors
///
/// Returns [`ClassifyError::NoMatches`] if no record survives.
pub fn classify(
    domain: Domain,
    records: &[LocationRecord],
) -> Result<Classification, ClassifyError> {
    let mut results = Vec::new();
    let mut invalid_coordinates = 0;

    for record in records.iter().filter(|r| accepts(domain, r)) {
        let Some((lat, lon)) = usable_coordinates(domain, record) else {
            invalid_coordinates += 1;
            continue;
        };

        results.push(ClassifiedResult {
            lat,
            lon,
            display_name: record.display_name_or_empty().to_string(),
            kind: record.effective_type().to_string(),
            importance: record.importance,
        });
    }

    if results.is_empty() {
        return Err(ClassifyError::NoMatches {
            examined: records.len(),
            invalid_coordinates,
        });
    }

    Ok(Classification {
        kept: results.len(),
        results,
        examined: records.len(),
        invalid_coordinates,
    })
}

/// Picks the best intersection match: the first record with usable
/// coordinates. Records before it without usable coordinates are counted.
///
/// # Errors
///
/// Returns [`ClassifyError::NoMatches`] if no record has usable
/// coordinates.
pub fn first_intersection(
    records: &[LocationRecord],
) -> Result<Classification<IntersectionResult>, ClassifyError> {
    let mut invalid_coordinates = 0;

    for record in records {
        let Some((lat, lon)) = usable_coordinates(Domain::Intersection, record) else {
            invalid_coordinates += 1;
            continue;
        };

        return Ok(Classification {
            results: IntersectionResult {
                lat,
                lon,
                display_name: record.display_name_or_empty().to_string(),
            },
            kept: 1,
            examined: records.len(),
            invalid_coordinates,
        });
    }

    Err(ClassifyError::NoMatches {
        examined: records.len(),
        invalid_coordinates,
    })
}

fn usable_coordinates(domain: Domain, record: &LocationRecord) -> Option<(f64, f64)> {
    let coordinates = record.coordinates();
    if coordinates.is_none() {
        log::warn!(
            "Dropping {domain} match with invalid coordinates: {:?}",
            record.display_name_or_empty()
        );
    }
    coordinates
}
