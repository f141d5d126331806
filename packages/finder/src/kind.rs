//! The three finder domains.
//!
//! Each domain fixes what the user types in, how that becomes a query, and
//! what a successful search produces.

use geo_aid_geocoder::classify::{self, Classification, ClassifyError};
use geo_aid_geocoder::query;
use geo_aid_geocoder_models::{ClassifiedResult, Domain, IntersectionResult, LocationRecord};

/// Behaviour that differs between the intersection, street and highway
/// finders.
pub trait FinderKind {
    /// What the user supplies for one search.
    type Input;
    /// What a successful search produces.
    type Output;

    /// The domain this finder searches.
    const DOMAIN: Domain;

    /// Builds the free-text query for `input`.
    fn query_text(input: &Self::Input) -> String;

    /// Turns the raw records into this finder's result, with the counts of
    /// kept and dropped records.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::NoMatches`] if no record is usable.
    fn classify(
        records: &[LocationRecord],
    ) -> Result<Classification<Self::Output>, ClassifyError>;
}

/// The two roads of an intersection query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadPair {
    /// First road (e.g., "Main Street").
    pub road1: String,
    /// Second road (e.g., "Broadway").
    pub road2: String,
}

impl RoadPair {
    /// Creates a pair from any two strings.
    #[must_use]
    pub fn new(road1: impl Into<String>, road2: impl Into<String>) -> Self {
        Self {
            road1: road1.into(),
            road2: road2.into(),
        }
    }
}

/// Finds where two roads meet.
#[derive(Debug, Clone, Copy)]
pub struct Intersection;

impl FinderKind for Intersection {
    type Input = RoadPair;
    type Output = IntersectionResult;

    const DOMAIN: Domain = Domain::Intersection;

    fn query_text(input: &RoadPair) -> String {
        query::intersection(&input.road1, &input.road2)
    }

    fn classify(
        records: &[LocationRecord],
    ) -> Result<Classification<IntersectionResult>, ClassifyError> {
        classify::first_intersection(records)
    }
}

/// Finds streets by name.
#[derive(Debug, Clone, Copy)]
pub struct Street;

impl FinderKind for Street {
    type Input = String;
    type Output = Vec<ClassifiedResult>;

    const DOMAIN: Domain = Domain::Street;

    fn query_text(input: &Self::Input) -> String {
        query::by_name(input)
    }

    fn classify(records: &[LocationRecord]) -> Result<Classification, ClassifyError> {
        classify::classify(Self::DOMAIN, records)
    }
}

/// Finds highways by name or number.
#[derive(Debug, Clone, Copy)]
pub struct Highway;

impl FinderKind for Highway {
    type Input = String;
    type Output = Vec<ClassifiedResult>;

    const DOMAIN: Domain = Domain::Highway;

    fn query_text(input: &Self::Input) -> String {
        query::by_name(input)
    }

    fn classify(records: &[LocationRecord]) -> Result<Classification, ClassifyError> {
        classify::classify(Self::DOMAIN, records)
    }
}

#[cfg(test)]
mod tests {
    use geo_aid_geocoder::RawCoordinate;

    use super::*;

    fn record(lat: &str, class: &str, kind: &str, name: &str) -> LocationRecord {
        LocationRecord {
            lat: Some(RawCoordinate::Text(lat.to_string())),
            lon: Some(RawCoordinate::Text("-93.26".to_string())),
            display_name: Some(name.to_string()),
            class: Some(class.to_string()),
            kind: Some(kind.to_string()),
            ..LocationRecord::default()
        }
    }

    #[test]
    fn highway_keeps_invalid_coordinate_count() {
        let records = [
            record("44.97", "highway", "motorway", "I-35W"),
            record("north", "highway", "primary", "Hiawatha Avenue"),
            record("44.98", "leisure", "stadium", "Target Center"),
        ];
        let classification = Highway::classify(&records).unwrap();
        assert_eq!(classification.kept, 1);
        assert_eq!(classification.examined, 3);
        assert_eq!(classification.invalid_coordinates, 1);
        assert_eq!(classification.results[0].display_name, "I-35W");
    }

    #[test]
    fn intersection_keeps_invalid_coordinate_count() {
        let records = [
            record("", "highway", "crossing", "Broken"),
            record("40.73", "highway", "traffic_signals", "Main Street & Broadway"),
        ];
        let classification = Intersection::classify(&records).unwrap();
        assert_eq!(classification.kept, 1);
        assert_eq!(classification.invalid_coordinates, 1);
        assert_eq!(classification.results.display_name, "Main Street & Broadway");
    }
}
