//! Text and JSON rendering of finder states.

use geo_aid_finder::FinderState;
use geo_aid_geocoder::map_link;
use geo_aid_geocoder_models::{ClassifiedResult, Domain, IntersectionResult};
use serde::Serialize;

/// One displayed result with its map link.
#[derive(Debug, Serialize)]
pub struct Entry<'a> {
    display_name: &'a str,
    lat: f64,
    lon: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    importance: Option<f64>,
    map_url: String,
}

/// A finder output that can be listed.
pub trait ResultSet {
    /// The results as display entries, in order.
    fn entries(&self, domain: Domain) -> Vec<Entry<'_>>;

    /// Heading shown above the entries.
    fn heading(&self, domain: Domain) -> String;
}

impl ResultSet for IntersectionResult {
    fn entries(&self, _domain: Domain) -> Vec<Entry<'_>> {
        vec![Entry {
            display_name: &self.display_name,
            lat: self.lat,
            lon: self.lon,
            kind: None,
            importance: None,
            map_url: map_link::for_intersection(self),
        }]
    }

    fn heading(&self, _domain: Domain) -> String {
        "Intersection Found".to_string()
    }
}

impl ResultSet for Vec<ClassifiedResult> {
    fn entries(&self, domain: Domain) -> Vec<Entry<'_>> {
        self.iter()
            .map(|r| Entry {
                display_name: &r.display_name,
                lat: r.lat,
                lon: r.lon,
                kind: Some(&r.kind),
                importance: r.importance,
                map_url: map_link::for_result(domain, r),
            })
            .collect()
    }

    fn heading(&self, domain: Domain) -> String {
        match domain {
            Domain::Highway => format!("Found {} Highways", self.len()),
            Domain::Intersection | Domain::Street => format!("Found {} Locations", self.len()),
        }
    }
}

fn entry_text(entry: &Entry<'_>) -> String {
    let mut lines = vec![
        String::new(),
        entry.display_name.to_string(),
        format!("  Latitude: {}", entry.lat),
        format!("  Longitude: {}", entry.lon),
    ];
    if let Some(kind) = entry.kind {
        lines.push(format!("  Type: {kind}"));
    }
    lines.push(format!("  View on OpenStreetMap: {}", entry.map_url));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Renders a finder state for the terminal.
#[must_use]
pub fn text<T: ResultSet>(domain: Domain, state: &FinderState<T>) -> String {
    match state {
        FinderState::Idle => String::new(),
        FinderState::Loading { query } => format!("Searching for {query:?}..."),
        FinderState::Empty { message } | FinderState::Failed { message } => (*message).to_string(),
        FinderState::Results(results) => {
            let mut out = results.heading(domain);
            out.push('\n');
            for entry in results.entries(domain) {
                out.push_str(&entry_text(&entry));
            }
            out
        }
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    domain: Domain,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    results: Vec<Entry<'a>>,
}

/// Renders a finder state as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json<T: ResultSet>(
    domain: Domain,
    state: &FinderState<T>,
) -> Result<String, serde_json::Error> {
    let (status, results) = match state {
        FinderState::Idle => ("idle", Vec::new()),
        FinderState::Loading { .. } => ("loading", Vec::new()),
        FinderState::Results(results) => ("results", results.entries(domain)),
        FinderState::Empty { .. } => ("empty", Vec::new()),
        FinderState::Failed { .. } => ("failed", Vec::new()),
    };

    serde_json::to_string_pretty(&Report {
        domain,
        status,
        message: state.message(),
        results,
    })
}
