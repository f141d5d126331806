#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Search state machines for the intersection, street and highway finders.
//!
//! Each [`Finder`] owns its own state and moves through
//! `Idle → Loading → Results | Empty | Failed`. A new submit always clears
//! the previous outcome and goes back to `Loading`, whatever state the
//! finder was in.
//!
//! Every submit draws a fresh sequence number. Only the response for the
//! latest ticket is applied; a slower response for a superseded query is
//! dropped instead of overwriting fresher state.
//!
//! The three finders share nothing but the read-only geocoding service, so
//! a failure in one never touches the others and all three may have a
//! request in flight at once.

pub mod kind;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use geo_aid_geocoder::{GeocodeError, GeocodingService, LocationRecord, SearchQuery};
use geo_aid_geocoder_models::Domain;

pub use kind::{FinderKind, Highway, Intersection, RoadPair, Street};

/// Where a finder is in its request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FinderState<T> {
    /// Nothing submitted yet.
    Idle,
    /// A request is in flight.
    Loading {
        /// The free-text query that was sent.
        query: String,
    },
    /// The last search produced results.
    Results(T),
    /// The last search completed but nothing usable matched.
    Empty {
        /// Guidance on refining the query.
        message: &'static str,
    },
    /// The last search failed at the transport level.
    Failed {
        /// Generic failure message.
        message: &'static str,
    },
}

impl<T> FinderState<T> {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// The results, if the last search produced any.
    #[must_use]
    pub const fn results(&self) -> Option<&T> {
        match self {
            Self::Results(results) => Some(results),
            _ => None,
        }
    }

    /// The message to show the user, if the last search did not succeed.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Empty { message } | Self::Failed { message } => Some(*message),
            Self::Idle | Self::Loading { .. } | Self::Results(_) => None,
        }
    }
}

/// Handle for one submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Sequence number, unique and increasing per finder.
    pub seq: u64,
    /// The request to send for this search.
    pub query: SearchQuery,
}

/// What happened to a response handed to [`Finder::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response belonged to the latest ticket and updated the state.
    Applied,
    /// The response was for a superseded or already-completed ticket and
    /// was dropped.
    Stale,
}

/// One independent search state machine.
pub struct Finder<K: FinderKind> {
    state: FinderState<K::Output>,
    last_seq: u64,
    in_flight: Option<u64>,
    _kind: PhantomData<K>,
}

impl<K: FinderKind> fmt::Debug for Finder<K>
where
    K::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finder")
            .field("domain", &K::DOMAIN)
            .field("state", &self.state)
            .field("last_seq", &self.last_seq)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl<K: FinderKind> Default for Finder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FinderKind> Finder<K> {
    /// Creates an idle finder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: FinderState::Idle,
            last_seq: 0,
            in_flight: None,
            _kind: PhantomData,
        }
    }

    /// The domain this finder searches.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        K::DOMAIN
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &FinderState<K::Output> {
        &self.state
    }

    /// Starts a search: clears any previous outcome, enters `Loading`, and
    /// issues a ticket that supersedes every earlier one.
    pub fn begin(&mut self, input: &K::Input) -> Ticket {
        self.last_seq += 1;
        self.in_flight = Some(self.last_seq);

        let text = K::query_text(input);
        log::info!("{} search #{}: {text:?}", K::DOMAIN, self.last_seq);

        self.state = FinderState::Loading {
            query: text.clone(),
        };

        Ticket {
            seq: self.last_seq,
            query: SearchQuery::for_domain(K::DOMAIN, text),
        }
    }

    /// Applies the service's response for `ticket`.
    ///
    /// Responses for any ticket other than the latest in-flight one are
    /// dropped and leave the state untouched.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        response: Result<Vec<LocationRecord>, GeocodeError>,
    ) -> Completion {
        if self.in_flight != Some(ticket.seq) {
            log::debug!(
                "{} search #{}: dropping stale response (latest is #{})",
                K::DOMAIN,
                ticket.seq,
                self.last_seq
            );
            return Completion::Stale;
        }
        self.in_flight = None;

        self.state = match response {
            Ok(records) => match K::classify(&records) {
                Ok(classification) => {
                    log::info!(
                        "{} search #{}: kept {} of {} record(s), {} with invalid coordinates",
                        K::DOMAIN,
                        ticket.seq,
                        classification.kept,
                        classification.examined,
                        classification.invalid_coordinates
                    );
                    FinderState::Results(classification.results)
                }
                Err(e) => {
                    log::info!("{} search #{}: {e}", K::DOMAIN, ticket.seq);
                    FinderState::Empty {
                        message: K::DOMAIN.no_match_message(),
                    }
                }
            },
            Err(e) => {
                log::error!("{} search #{} failed: {e}", K::DOMAIN, ticket.seq);
                FinderState::Failed {
                    message: K::DOMAIN.failure_message(),
                }
            }
        };

        Completion::Applied
    }

    /// Runs one full search against `service` and returns the new state.
    pub async fn submit<S: GeocodingService + ?Sized>(
        &mut self,
        service: &S,
        input: &K::Input,
    ) -> &FinderState<K::Output> {
        let ticket = self.begin(input);
        let response = service.search(&ticket.query).await;
        self.complete(&ticket, response);
        &self.state
    }
}

/// The three finders over one shared geocoding service.
pub struct Finders<S: ?Sized> {
    service: Arc<S>,
    /// Intersection finder.
    pub intersection: Finder<Intersection>,
    /// Street finder.
    pub street: Finder<Street>,
    /// Highway finder.
    pub highway: Finder<Highway>,
}

impl<S: GeocodingService + ?Sized> Finders<S> {
    /// Creates three idle finders backed by `service`.
    #[must_use]
    pub const fn new(service: Arc<S>) -> Self {
        Self {
            service,
            intersection: Finder::new(),
            street: Finder::new(),
            highway: Finder::new(),
        }
    }

    /// Looks up where two roads meet.
    pub async fn find_intersection(
        &mut self,
        roads: &RoadPair,
    ) -> &FinderState<<Intersection as FinderKind>::Output> {
        self.intersection.submit(&*self.service, roads).await
    }

    /// Looks up streets by name.
    pub async fn find_streets(
        &mut self,
        name: &str,
    ) -> &FinderState<<Street as FinderKind>::Output> {
        self.street
            .submit(&*self.service, &name.to_string())
            .await
    }

    /// Looks up highways by name or number.
    pub async fn find_highways(
        &mut self,
        name: &str,
    ) -> &FinderState<<Highway as FinderKind>::Output> {
        self.highway
            .submit(&*self.service, &name.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use geo_aid_geocoder::RawCoordinate;

    use super::*;

    /// In-memory geocoder keyed by query text.
    #[derive(Default)]
    struct FakeGeocoder {
        responses: HashMap<String, Vec<LocationRecord>>,
        failing: Vec<String>,
        seen: Mutex<Vec<SearchQuery>>,
    }

    impl FakeGeocoder {
        fn with(mut self, text: &str, records: Vec<LocationRecord>) -> Self {
            self.responses.insert(text.to_string(), records);
            self
        }

        fn failing(mut self, text: &str) -> Self {
            self.failing.push(text.to_string());
            self
        }
    }

    #[async_trait]
    impl GeocodingService for FakeGeocoder {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<LocationRecord>, GeocodeError> {
            self.seen.lock().unwrap().push(query.clone());
            if self.failing.contains(&query.text) {
                return Err(GeocodeError::Parse {
                    message: "boom".to_string(),
                });
            }
            Ok(self.responses.get(&query.text).cloned().unwrap_or_default())
        }
    }

    fn record(lat: &str, lon: &str, class: &str, kind: &str, name: &str) -> LocationRecord {
        LocationRecord {
            lat: Some(RawCoordinate::Text(lat.to_string())),
            lon: Some(RawCoordinate::Text(lon.to_string())),
            display_name: Some(name.to_string()),
            class: Some(class.to_string()),
            kind: Some(kind.to_string()),
            importance: Some(0.5),
            ..LocationRecord::default()
        }
    }

    #[tokio::test]
    async fn street_search_yields_results() {
        let geocoder = FakeGeocoder::default().with(
            "Main Street",
            vec![
                record("42.36", "-71.06", "highway", "residential", "Main Street, Boston"),
                record("42.37", "-71.05", "building", "house", "1 Main Street"),
            ],
        );
        let mut finder = Finder::<Street>::new();

        let state = finder.submit(&geocoder, &"Main Street".to_string()).await;
        let results = state.results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_name, "Main Street, Boston");

        let seen = geocoder.seen.lock().unwrap();
        assert_eq!(seen[0].limit, 50);
        assert!(seen[0].address_details);
    }

    #[tokio::test]
    async fn empty_response_is_guidance_not_failure() {
        let geocoder = FakeGeocoder::default();

        let mut intersection = Finder::<Intersection>::new();
        let state = intersection
            .submit(&geocoder, &RoadPair::new("Nowhere", "Elsewhere"))
            .await;
        assert_eq!(
            state,
            &FinderState::Empty {
                message: Domain::Intersection.no_match_message()
            }
        );

        let mut street = Finder::<Street>::new();
        let state = street.submit(&geocoder, &"Nowhere".to_string()).await;
        assert_eq!(state.message(), Some(Domain::Street.no_match_message()));

        let mut highway = Finder::<Highway>::new();
        let state = highway.submit(&geocoder, &"Nowhere".to_string()).await;
        assert!(matches!(state, FinderState::Empty { .. }));
    }

    #[tokio::test]
    async fn filtered_out_response_is_guidance() {
        let geocoder = FakeGeocoder::default().with(
            "Main Street",
            vec![record("1", "2", "building", "house", "123 Main Street")],
        );
        let mut finder = Finder::<Street>::new();
        let state = finder.submit(&geocoder, &"Main Street".to_string()).await;
        assert!(matches!(state, FinderState::Empty { .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_generic_message() {
        let geocoder = FakeGeocoder::default().failing("A1");
        let mut finder = Finder::<Highway>::new();
        let state = finder.submit(&geocoder, &"A1".to_string()).await;
        assert_eq!(
            state,
            &FinderState::Failed {
                message: "An error occurred while searching for highways."
            }
        );
    }

    #[test]
    fn begin_clears_previous_outcome() {
        let mut finder = Finder::<Highway>::new();
        let ticket = finder.begin(&"US Route 66".to_string());
        finder.complete(
            &ticket,
            Ok(vec![record("35", "-100", "unclassified", "", "US Route 66")]),
        );
        assert!(finder.state().results().is_some());

        let ticket = finder.begin(&"I-94".to_string());
        assert_eq!(
            finder.state(),
            &FinderState::Loading {
                query: "I-94".to_string()
            }
        );
        assert_eq!(ticket.seq, 2);
    }

    #[test]
    fn intersection_ticket_uses_joined_query() {
        let mut finder = Finder::<Intersection>::new();
        let ticket = finder.begin(&RoadPair::new("Main Street", "Broadway"));
        assert_eq!(ticket.query.text, "Main Street & Broadway");
        assert_eq!(ticket.query.limit, 1);
        assert!(!ticket.query.address_details);
    }

    #[test]
    fn stale_response_is_dropped_regardless_of_arrival_order() {
        let mut finder = Finder::<Street>::new();
        let first = finder.begin(&"Elm".to_string());
        let second = finder.begin(&"Oak".to_string());

        let oak = vec![record("1", "1", "highway", "residential", "Oak Street")];
        let elm = vec![record("2", "2", "highway", "residential", "Elm Street")];

        // Newer response first, then the stale one.
        assert_eq!(finder.complete(&second, Ok(oak.clone())), Completion::Applied);
        assert_eq!(finder.complete(&first, Ok(elm.clone())), Completion::Stale);
        assert_eq!(
            finder.state().results().unwrap()[0].display_name,
            "Oak Street"
        );

        // Stale response first, then the newer one.
        let mut finder = Finder::<Street>::new();
        let first = finder.begin(&"Elm".to_string());
        let second = finder.begin(&"Oak".to_string());
        assert_eq!(finder.complete(&first, Ok(elm)), Completion::Stale);
        assert!(finder.state().is_loading());
        assert_eq!(finder.complete(&second, Ok(oak)), Completion::Applied);
        assert_eq!(
            finder.state().results().unwrap()[0].display_name,
            "Oak Street"
        );
    }

    #[test]
    fn completing_twice_is_stale() {
        let mut finder = Finder::<Street>::new();
        let ticket = finder.begin(&"Elm".to_string());
        assert_eq!(finder.complete(&ticket, Ok(vec![])), Completion::Applied);
        assert_eq!(
            finder.complete(
                &ticket,
                Err(GeocodeError::Parse {
                    message: "late".to_string()
                })
            ),
            Completion::Stale
        );
        assert!(matches!(finder.state(), FinderState::Empty { .. }));
    }

    #[tokio::test]
    async fn finders_are_independent() {
        let geocoder = Arc::new(
            FakeGeocoder::default()
                .with(
                    "Main Street & Broadway",
                    vec![record("40.7", "-73.9", "highway", "crossing", "Main & Broadway")],
                )
                .with(
                    "MN-62",
                    vec![record("44.9", "-93.3", "highway", "trunk", "MN-62, Minnesota")],
                )
                .failing("Elm Street"),
        );
        let mut finders = Finders::new(Arc::clone(&geocoder));

        let Finders {
            service,
            intersection,
            street,
            highway,
        } = &mut finders;
        let roads = RoadPair::new("Main Street", "Broadway");
        let elm = "Elm Street".to_string();
        let mn62 = "MN-62".to_string();
        tokio::join!(
            intersection.submit(&**service, &roads),
            street.submit(&**service, &elm),
            highway.submit(&**service, &mn62),
        );

        assert_eq!(
            finders.intersection.state().results().unwrap().display_name,
            "Main & Broadway"
        );
        assert!(matches!(finders.street.state(), FinderState::Failed { .. }));
        assert_eq!(finders.highway.state().results().unwrap().len(), 1);

        let state = finders.find_streets("Elm Street").await;
        assert!(matches!(state, FinderState::Failed { .. }));
        assert!(finders.highway.state().results().is_some());
        assert_eq!(geocoder.seen.lock().unwrap().len(), 4);
    }
}
