use std::future::Future;

use crate::{coordinate::Coordinate, error::RoutingError, route_candidate::FetchedRoute};

/// A routing service able to return alternative paths between two points.
///
/// Implementations return the routes in the order the service ranked them and
/// always ask for alternatives when the service supports it. A response without
/// any route is reported as [`RoutingError::NoRoutes`].
pub trait RouteProvider {
    fn fetch_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<Vec<FetchedRoute>, RoutingError>> + Send;
}
