use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{
    coordinate::Coordinate,
    error::{RouteUnavailable, RoutingError},
    route_candidate::RouteSet,
    route_point::RoutePoint,
    route_provider::RouteProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRefresh {
    /// A new route set replaced the previous one
    Applied { candidates: usize },

    /// A newer request was issued while this one was outstanding, its result was dropped
    Superseded,

    /// No destination yet, nothing to fetch
    Skipped,
}

#[derive(Default)]
struct RouteState {
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
    route_set: Arc<RouteSet>,

    /// Sequence number of the most recently issued fetch
    issued: u64,

    /// Sequence number of the most recently resolved fetch, equal to `issued` when idle
    settled: u64,
}

/// Marks a fetch as settled when it ends, including when its future is dropped
/// before the provider answers. A fetch superseded since is left alone.
struct Settle<'a> {
    state: &'a RwLock<RouteState>,
    sequence: u64,
}

impl Drop for Settle<'_> {
    fn drop(&mut self) {
        let mut state = self.state.write();
        if state.issued == self.sequence {
            state.settled = self.sequence;
        }
    }
}

/// Owns the current [`RouteSet`] and the origin/destination it was fetched for.
///
/// Every mutation goes through a single lock so readers only ever observe a
/// complete route set. Overlapping fetches are allowed; each one is tagged with a
/// sequence number and only the most recently issued one may publish its result.
pub struct RouteCandidateManager<P> {
    provider: P,
    state: RwLock<RouteState>,
}

impl<P> RouteCandidateManager<P>
where
    P: RouteProvider,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: RwLock::new(RouteState::default()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.state.read().origin
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.state.read().destination
    }

    /// Snapshot of the current route set. Later fetches replace the set held by the
    /// manager but never alter a snapshot already handed out.
    pub fn route_set(&self) -> Arc<RouteSet> {
        Arc::clone(&self.state.read().route_set)
    }

    /// Full precision distance of the active candidate in kilometers.
    pub fn active_distance_km(&self) -> Option<f64> {
        self.state.read().route_set.active_distance_km()
    }

    pub fn is_fetching(&self) -> bool {
        let state = self.state.read();
        state.issued != state.settled
    }

    pub async fn place(&self, point: RoutePoint) -> Result<RouteRefresh, RouteUnavailable> {
        match point {
            RoutePoint::Origin(coordinate) => self.set_origin(coordinate).await,
            RoutePoint::Destination(coordinate) => self.set_destination(coordinate).await,
        }
    }

    /// Moving the origin invalidates the current candidates. They are refetched
    /// when a destination is already placed.
    pub async fn set_origin(
        &self,
        coordinate: Coordinate,
    ) -> Result<RouteRefresh, RouteUnavailable> {
        let has_destination = {
            let mut state = self.state.write();
            state.origin = Some(coordinate);
            state.route_set = Arc::new(RouteSet::default());
            state.destination.is_some()
        };

        if !has_destination {
            return Ok(RouteRefresh::Skipped);
        }

        self.recompute().await
    }

    pub async fn set_destination(
        &self,
        coordinate: Coordinate,
    ) -> Result<RouteRefresh, RouteUnavailable> {
        self.state.write().destination = Some(coordinate);

        self.recompute().await
    }

    /// Drops the destination and the route set. Any outstanding fetch is superseded.
    pub fn clear_destination(&self) {
        let mut state = self.state.write();
        state.destination = None;
        state.route_set = Arc::new(RouteSet::default());
        state.issued += 1;
        state.settled = state.issued;
    }

    /// Ignores out of range indices. Returns whether the active candidate changed.
    pub fn select_candidate(&self, index: usize) -> bool {
        let mut state = self.state.write();
        if index >= state.route_set.len() {
            return false;
        }

        let changed = Arc::make_mut(&mut state.route_set).select(index);
        if changed {
            debug!("Selected route candidate {}", index);
        }

        changed
    }

    /// Fetches alternatives for the current origin and destination.
    ///
    /// On success the route set is replaced wholesale and the first candidate
    /// becomes active. On failure the previous route set is kept. No retry.
    pub async fn recompute(&self) -> Result<RouteRefresh, RouteUnavailable> {
        let (sequence, origin, destination) = {
            let mut state = self.state.write();
            let (Some(origin), Some(destination)) = (state.origin, state.destination) else {
                return Err(RouteUnavailable(RoutingError::MissingEndpoints));
            };

            state.issued += 1;
            (state.issued, origin, destination)
        };
        let _settle = Settle {
            state: &self.state,
            sequence,
        };

        debug!(
            "Requesting route alternatives #{} from {} to {}",
            sequence, origin, destination
        );

        let result = self.provider.fetch_routes(origin, destination).await;

        let mut state = self.state.write();
        if sequence != state.issued {
            debug!(
                "Discarding route response #{}, #{} is newer",
                sequence, state.issued
            );
            return Ok(RouteRefresh::Superseded);
        }
        state.settled = sequence;

        let route_set = result
            .and_then(|routes| RouteSet::from_fetched(routes).ok_or(RoutingError::NoRoutes))
            .map_err(|error| {
                warn!("Route request #{} failed: {}", sequence, error);
                RouteUnavailable(error)
            })?;

        let candidates = route_set.len();
        state.route_set = Arc::new(route_set);

        info!("Found {} route candidate(s)", candidates);

        Ok(RouteRefresh::Applied { candidates })
    }
}
