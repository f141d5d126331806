//! `OpenStreetMap` viewer links for results.

use geo_aid_geocoder_models::{ClassifiedResult, Domain, IntersectionResult};

const OSM_VIEWER_URL: &str = "https://www.openstreetmap.org/";

/// Builds a viewer URL that drops a marker at `(lat, lon)`.
#[must_use]
pub fn osm_link(lat: f64, lon: f64, zoom: u8) -> String {
    format!("{OSM_VIEWER_URL}?mlat={lat}&mlon={lon}&zoom={zoom}")
}

/// Viewer link for a street or highway result.
#[must_use]
pub fn for_result(domain: Domain, result: &ClassifiedResult) -> String {
    osm_link(result.lat, result.lon, domain.map_zoom())
}

/// Viewer link for an intersection result.
#[must_use]
pub fn for_intersection(result: &IntersectionResult) -> String {
    osm_link(result.lat, result.lon, Domain::Intersection.map_zoom())
}
