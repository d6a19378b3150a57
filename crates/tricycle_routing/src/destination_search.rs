use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    geocoding::{Geocoder, GeocodingError, Place},
    points_of_interest::LocalPlaces,
};

/// Shorter queries never trigger a lookup.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceSource {
    Local,
    Geocoder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    QueryTooShort,
    Matches {
        source: PlaceSource,
        places: Vec<Place>,
    },
}

/// Reported both when the geocoder has no result and when it could not be reached.
#[derive(Debug, Error)]
#[error("No match found for '{query}'")]
pub struct NoGeocodeMatch {
    pub query: String,
    pub source: Option<GeocodingError>,
}

#[derive(Default)]
struct Suggestions {
    /// Bumped by every search
    generation: u64,

    /// Generation of the last search that ended, equal to `generation` when idle
    settled: u64,
    places: Vec<Place>,
}

/// Settles a search when it ends or when its future is dropped. A search
/// replaced by a newer one is left to that one.
struct Lookup<'a> {
    suggestions: &'a Mutex<Suggestions>,
    generation: u64,
}

impl Drop for Lookup<'_> {
    fn drop(&mut self) {
        let mut suggestions = self.suggestions.lock();
        if suggestions.generation == self.generation {
            suggestions.settled = self.generation;
        }
    }
}

pub struct DestinationSearch<G> {
    local: LocalPlaces,
    geocoder: G,
    suggestions: Mutex<Suggestions>,
}

impl<G> DestinationSearch<G>
where
    G: Geocoder,
{
    pub fn new(local: LocalPlaces, geocoder: G) -> Self {
        Self {
            local,
            geocoder,
            suggestions: Mutex::new(Suggestions::default()),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn is_searching(&self) -> bool {
        let suggestions = self.suggestions.lock();
        suggestions.generation != suggestions.settled
    }

    /// Suggestions of the last search that produced matches, empty otherwise.
    pub fn suggestions(&self) -> Vec<Place> {
        self.suggestions.lock().places.clone()
    }

    /// Looks the query up in the local place list, then in the geocoder.
    ///
    /// Previous suggestions are cleared before anything else so a failed or
    /// too short query never leaves stale entries behind.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, NoGeocodeMatch> {
        let generation = {
            let mut suggestions = self.suggestions.lock();
            suggestions.generation += 1;
            suggestions.places.clear();
            suggestions.generation
        };
        let _lookup = Lookup {
            suggestions: &self.suggestions,
            generation,
        };

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchOutcome::QueryTooShort);
        }

        let local = self.local.matching(query);
        let (source, places) = if !local.is_empty() {
            (PlaceSource::Local, local)
        } else {
            debug!("No local place matches '{}', asking the geocoder", query);

            let places = self.geocoder.geocode(query).await.map_err(|error| {
                warn!("Geocoding '{}' failed: {}", query, error);
                NoGeocodeMatch {
                    query: query.to_string(),
                    source: Some(error),
                }
            })?;

            if places.is_empty() {
                return Err(NoGeocodeMatch {
                    query: query.to_string(),
                    source: None,
                });
            }

            (PlaceSource::Geocoder, places)
        };

        let mut suggestions = self.suggestions.lock();
        if suggestions.generation == generation {
            suggestions.places = places.clone();
        }

        Ok(SearchOutcome::Matches { source, places })
    }
}
