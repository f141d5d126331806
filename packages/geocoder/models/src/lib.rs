#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the GeoAid finders.
//!
//! This crate contains only data types and the per-domain constants
//! (result limits, map zoom levels, user-facing messages). It has no
//! heavyweight dependencies (no HTTP client, no I/O).

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which finder a search belongs to.
///
/// Each domain has its own query shape, inclusion rule, and messages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Domain {
    /// Two roads crossing; single best match.
    Intersection,
    /// Streets, roads, paths and other local ways.
    Street,
    /// Motorways, trunk roads, numbered routes.
    Highway,
}

impl Domain {
    /// All domains in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Intersection, Self::Street, Self::Highway]
    }

    /// Maximum number of records requested from the geocoder.
    #[must_use]
    pub const fn result_limit(self) -> u32 {
        match self {
            Self::Intersection => 1,
            Self::Street | Self::Highway => 50,
        }
    }

    /// Whether the address breakdown is requested alongside each record.
    #[must_use]
    pub const fn address_details(self) -> bool {
        match self {
            Self::Intersection => false,
            Self::Street | Self::Highway => true,
        }
    }

    /// Zoom level used for map links to results of this domain.
    #[must_use]
    pub const fn map_zoom(self) -> u8 {
        match self {
            Self::Intersection | Self::Street => 17,
            Self::Highway => 12,
        }
    }

    /// Guidance shown when a search completes without any usable match.
    #[must_use]
    pub const fn no_match_message(self) -> &'static str {
        match self {
            Self::Intersection => "Intersection not found. Please try different road names.",
            Self::Street => {
                "No streets found with that name. Try including the city name (e.g., \"Main Street, Boston\")"
            }
            Self::Highway => {
                "No highways found. Try including the state/country (e.g., \"MN-62 Minnesota\" or \"A1 Highway UK\")"
            }
        }
    }

    /// Generic message shown when the request itself fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Intersection => "An error occurred while searching for the intersection.",
            Self::Street => "An error occurred while searching for streets.",
            Self::Highway => "An error occurred while searching for highways.",
        }
    }

    /// Human-readable finder title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Intersection => "Intersection Finder",
            Self::Street => "Street Finder",
            Self::Highway => "Highway Finder",
        }
    }
}

/// A coordinate as it appears on the wire.
///
/// Nominatim sends coordinates as decimal strings, but numeric values are
/// accepted too. Any other JSON shape is kept as [`RawCoordinate::Other`]
/// so that one odd record cannot fail the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    /// Decimal degrees as text (e.g., `"44.9778"`).
    Text(String),
    /// Decimal degrees as a JSON number.
    Number(f64),
    /// Anything else (`true`, an object, an array). Never parses.
    Other(serde_json::Value),
}

impl RawCoordinate {
    /// Parses the coordinate into decimal degrees.
    ///
    /// Returns `None` for text that is not a decimal float, for
    /// non-finite values, and for [`RawCoordinate::Other`].
    #[must_use]
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Number(n) => *n,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Reads any JSON value, keeping it only if it has the expected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// A single location record as returned by the geocoding service.
///
/// Every field is optional: the service does not guarantee any of them,
/// and classification decides what to do with incomplete records. A field
/// of the wrong JSON type reads as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Provider-internal place identifier.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_id: Option<u64>,
    /// OSM element type (`node`, `way`, `relation`).
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub osm_type: Option<String>,
    /// OSM element identifier.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub osm_id: Option<u64>,
    /// Latitude (WGS84).
    #[serde(default)]
    pub lat: Option<RawCoordinate>,
    /// Longitude (WGS84).
    #[serde(default)]
    pub lon: Option<RawCoordinate>,
    /// Full human-readable place description.
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    /// Main classification tag (e.g., `"highway"`).
    #[serde(default, deserialize_with = "lenient")]
    pub class: Option<String>,
    /// Sub-classification tag (e.g., `"motorway"`).
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub kind: Option<String>,
    /// Relevance score assigned by the service. No defined range.
    #[serde(default, deserialize_with = "lenient")]
    pub importance: Option<f64>,
    /// Address breakdown, present when address details were requested.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<BTreeMap<String, String>>,
}

impl LocationRecord {
    /// Parsed `(lat, lon)` pair, or `None` if either side is missing or
    /// unparsable.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.as_ref()?.parse()?;
        let lon = self.lon.as_ref()?.parse()?;
        Some((lat, lon))
    }

    /// The record's `type` tag, falling back to `class` when `type` is
    /// missing or empty. Empty when both are missing.
    #[must_use]
    pub fn effective_type(&self) -> &str {
        self.kind
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.class.as_deref())
            .unwrap_or_default()
    }

    /// The display name, or the empty string when missing.
    #[must_use]
    pub fn display_name_or_empty(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }
}

/// A street or highway match ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedResult {
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
    /// Full human-readable place description.
    pub display_name: String,
    /// The record's `type` tag, or its `class` when `type` is absent.
    #[serde(rename = "type")]
    pub kind: String,
    /// Relevance score from the service, carried through unmodified.
    pub importance: Option<f64>,
}

/// The best match for a two-road intersection query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionResult {
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
    /// Full human-readable place description.
    pub display_name: String,
}
