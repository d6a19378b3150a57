use parking_lot::{Mutex, RwLock};
use tracing::debug;
use tricycle_fare::{
    error::FareError,
    fare_estimate::FareEstimate,
    fare_model_client::{FareModel, FareModelClient},
    fare_request_builder::FareRequestBuilder,
    trip_conditions::TripConditions,
};
use tricycle_routing::{
    coordinate::Coordinate,
    destination_search::{DestinationSearch, NoGeocodeMatch, SearchOutcome},
    error::RouteUnavailable,
    geocoding::{Geocoder, GeocodingError, NominatimClient, Place},
    osrm::OsrmRouteClient,
    points_of_interest::LocalPlaces,
    route_candidate_manager::{RouteCandidateManager, RouteRefresh},
    route_provider::RouteProvider,
};

use crate::{
    config::ServiceConfig,
    placement_mode::{PlacementEvent, PlacementMode},
};

/// One trip planning session: the routes between the placed points, the trip
/// conditions picked by the user and the fare estimate derived from both.
pub struct TripPlanner<P, G, M> {
    routes: RouteCandidateManager<P>,
    fares: FareRequestBuilder<M>,
    search: DestinationSearch<G>,
    conditions: RwLock<TripConditions>,
    mode: Mutex<PlacementMode>,
}

pub type ServiceTripPlanner = TripPlanner<OsrmRouteClient, NominatimClient, FareModelClient>;

impl ServiceTripPlanner {
    pub fn from_config(config: &ServiceConfig) -> Result<Self, GeocodingError> {
        Ok(TripPlanner::new(
            OsrmRouteClient::new(config.osrm_params()),
            NominatimClient::new(config.geocoder_params())?,
            FareModelClient::new(config.fare_model_params()),
        ))
    }
}

impl<P, G, M> TripPlanner<P, G, M>
where
    P: RouteProvider,
    G: Geocoder,
    M: FareModel,
{
    pub fn new(route_provider: P, geocoder: G, fare_model: M) -> Self {
        Self {
            routes: RouteCandidateManager::new(route_provider),
            fares: FareRequestBuilder::new(fare_model),
            search: DestinationSearch::new(LocalPlaces::default(), geocoder),
            conditions: RwLock::new(TripConditions::default()),
            mode: Mutex::new(PlacementMode::default()),
        }
    }

    pub fn routes(&self) -> &RouteCandidateManager<P> {
        &self.routes
    }

    pub fn fares(&self) -> &FareRequestBuilder<M> {
        &self.fares
    }

    pub fn destination_search(&self) -> &DestinationSearch<G> {
        &self.search
    }

    pub fn mode(&self) -> PlacementMode {
        *self.mode.lock()
    }

    pub fn toggle_mode(&self) -> PlacementMode {
        let mut mode = self.mode.lock();
        *mode = mode.transition(PlacementEvent::Toggle);
        *mode
    }

    /// Places a point according to the current mode, then advances the mode.
    pub async fn click_map(
        &self,
        coordinate: Coordinate,
    ) -> Result<RouteRefresh, RouteUnavailable> {
        let point = {
            let mut mode = self.mode.lock();
            let point = mode.point_at(coordinate);
            *mode = mode.transition(PlacementEvent::Placed);
            point
        };

        debug!("Placing {:?}", point);

        self.fares.clear_estimate();
        self.routes.place(point).await
    }

    /// Used for the initial location fix and for origin drags.
    pub async fn move_origin(
        &self,
        coordinate: Coordinate,
    ) -> Result<RouteRefresh, RouteUnavailable> {
        self.fares.clear_estimate();
        self.routes.set_origin(coordinate).await
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome, NoGeocodeMatch> {
        self.search.search(query).await
    }

    pub async fn choose_destination(
        &self,
        place: &Place,
    ) -> Result<RouteRefresh, RouteUnavailable> {
        debug!("Destination picked from search: {}", place.display_name);

        self.fares.clear_estimate();
        self.routes.set_destination(place.coordinate).await
    }

    /// Returns whether the active route changed. The current estimate is only
    /// dropped when it did.
    pub fn select_route(&self, index: usize) -> bool {
        let changed = self.routes.select_candidate(index);
        if changed {
            self.fares.clear_estimate();
        }

        changed
    }

    pub fn conditions(&self) -> TripConditions {
        *self.conditions.read()
    }

    pub fn set_conditions(&self, conditions: TripConditions) {
        *self.conditions.write() = conditions;
    }

    pub fn estimate(&self) -> Option<FareEstimate> {
        self.fares.estimate()
    }

    pub async fn submit_fare(&self) -> Result<FareEstimate, FareError> {
        let conditions = self.conditions();
        self.fares
            .submit(self.routes.active_distance_km(), conditions)
            .await
    }

    pub fn remove_destination(&self) {
        self.routes.clear_destination();
        self.fares.clear_estimate();
    }

    /// Clears the destination, the routes and the estimate. The origin and the
    /// trip conditions are kept.
    pub fn reset(&self) {
        self.remove_destination();
        *self.mode.lock() = PlacementMode::default();
    }
}
