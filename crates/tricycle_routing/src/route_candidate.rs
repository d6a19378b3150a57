use geo_types::LineString;
use jiff::SignedDuration;

use crate::coordinate::Coordinate;

/// A path as returned by a routing service, before it is indexed into a [`RouteSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRoute {
    pub geometry: Vec<Coordinate>,

    /// Distance in meters
    pub distance_meters: f64,

    /// Duration in seconds
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    index: usize,
    geometry: Vec<Coordinate>,
    distance_meters: f64,
    duration_seconds: f64,
}

impl RouteCandidate {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn geometry(&self) -> &[Coordinate] {
        &self.geometry
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Full precision distance, this is the value forwarded to the fare model.
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn duration(&self) -> SignedDuration {
        SignedDuration::try_from_secs_f64(self.duration_seconds).unwrap_or(SignedDuration::ZERO)
    }

    pub fn line_string(&self) -> LineString {
        self.geometry.iter().map(geo_types::Coord::from).collect()
    }
}

/// The ordered alternatives for one origin/destination pair. Order is the order
/// the routing service returned; it is never re-ranked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSet {
    candidates: Vec<RouteCandidate>,
    active_index: usize,
}

impl RouteSet {
    /// Returns `None` for an empty response, a route set always holds at least one
    /// candidate once it has been fetched.
    pub(crate) fn from_fetched(routes: Vec<FetchedRoute>) -> Option<Self> {
        if routes.is_empty() {
            return None;
        }

        let candidates = routes
            .into_iter()
            .enumerate()
            .map(|(index, route)| RouteCandidate {
                index,
                geometry: route.geometry,
                distance_meters: route.distance_meters,
                duration_seconds: route.duration_seconds,
            })
            .collect();

        Some(RouteSet {
            candidates,
            active_index: 0,
        })
    }

    pub fn candidates(&self) -> &[RouteCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Meaningless when the set is empty, see [`RouteSet::active`].
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> Option<&RouteCandidate> {
        self.candidates.get(self.active_index)
    }

    pub fn active_distance_km(&self) -> Option<f64> {
        self.active().map(RouteCandidate::distance_km)
    }

    /// Out of range indices are ignored. Returns whether the active candidate changed.
    pub(crate) fn select(&mut self, index: usize) -> bool {
        if index >= self.candidates.len() || index == self.active_index {
            return false;
        }

        self.active_index = index;
        true
    }
}

pub fn format_distance_km(distance_km: f64) -> String {
    format!("{:.2} km", distance_km)
}
