#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Road lookups against Nominatim / OpenStreetMap.
//!
//! The crate is split along the path a search takes:
//!
//! 1. [`query`] turns road names into the free-text query and request
//!    parameters for a [`Domain`].
//! 2. A [`GeocodingService`] runs the query. [`nominatim::NominatimClient`]
//!    is the production implementation; its endpoint comes from the
//!    [`service_registry`].
//! 3. [`classify`] filters the raw records into display-ready results.
//! 4. [`map_link`] builds `OpenStreetMap` viewer URLs for those results.
//!
//! All matching and ranking happens inside the external service. This
//! crate only decides which of the returned records count as a street or
//! highway.

pub mod classify;
pub mod map_link;
pub mod nominatim;
pub mod query;
pub mod service_registry;

use async_trait::async_trait;
pub use geo_aid_geocoder_models::{
    ClassifiedResult, Domain, IntersectionResult, LocationRecord, RawCoordinate,
};
use thiserror::Error;

pub use query::SearchQuery;

/// Errors from talking to the geocoding service.
///
/// A search that completes with zero usable records is not an error at
/// this level; see [`classify::ClassifyError`].
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Geocoder returned status {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// A black-box free-text geocoder.
///
/// One call per search; implementations return the raw records in the
/// order the service ranked them.
#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Runs a free-text search.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request fails or the response is not
    /// a list of location records.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<LocationRecord>, GeocodeError>;
}
