//! Nominatim / OpenStreetMap search client.
//!
//! Issues one free-text `GET {base_url}?q=...&format=json&limit=...` per
//! search and returns the raw record list. No retry and no rate limiting:
//! the public instance allows about one request per second, and each
//! search is a single user action.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use async_trait::async_trait;
use geo_aid_geocoder_models::LocationRecord;

use crate::service_registry::GeocodingServiceConfig;
use crate::{GeocodeError, GeocodingService, SearchQuery};

/// HTTP client bound to one Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Builds a client from a service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &GeocodingServiceConfig) -> Result<Self, GeocodeError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(builder.build()?, &config.base_url))
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// The search endpoint this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GeocodingService for NominatimClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<LocationRecord>, GeocodeError> {
        let limit = query.limit.to_string();
        let mut params = vec![("q", query.text.as_str()), ("format", "json")];
        if query.address_details {
            params.push(("addressdetails", "1"));
        }
        params.push(("limit", limit.as_str()));

        log::debug!("Nominatim search q={:?} limit={limit}", query.text);

        let resp = self.client.get(&self.base_url).query(&params).send().await?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !resp.status().is_success() {
            return Err(GeocodeError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(body)
    }
}

/// Parses a Nominatim JSON response into location records.
///
/// Only the top level must be an array. Each element is read on its own:
/// an element that is not an object becomes an empty record, which
/// classification then drops for its missing coordinates.
fn parse_response(body: serde_json::Value) -> Result<Vec<LocationRecord>, GeocodeError> {
    let serde_json::Value::Array(items) = body else {
        return Err(GeocodeError::Parse {
            message: "Nominatim response is not an array".to_string(),
        });
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                log::warn!("Nominatim record #{i} is malformed, keeping it empty: {e}");
                LocationRecord::default()
            })
        })
        .collect())
}
