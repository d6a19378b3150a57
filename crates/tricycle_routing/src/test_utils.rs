use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::{
    coordinate::Coordinate, error::RoutingError, route_candidate::FetchedRoute,
    route_provider::RouteProvider,
};

pub type RouteResult = Result<Vec<FetchedRoute>, RoutingError>;

pub fn fetched_route(distance_meters: f64, duration_seconds: f64) -> FetchedRoute {
    FetchedRoute {
        geometry: vec![
            Coordinate::new(7.4478, 125.8078).unwrap(),
            Coordinate::new(7.4312, 125.7985).unwrap(),
        ],
        distance_meters,
        duration_seconds,
    }
}

enum Scripted {
    Ready(RouteResult),
    Pending(oneshot::Receiver<RouteResult>),
}

/// Answers route requests in call order from a script. Pending entries resolve
/// when the test sends on the matching channel, which lets tests control the
/// order in which concurrent requests complete.
#[derive(Default)]
pub struct ScriptedRouteProvider {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(Coordinate, Coordinate)>>,
}

impl ScriptedRouteProvider {
    pub fn respond(self, result: RouteResult) -> Self {
        self.script.lock().push_back(Scripted::Ready(result));
        self
    }

    pub fn pending(&self) -> oneshot::Sender<RouteResult> {
        let (sender, receiver) = oneshot::channel();
        self.script.lock().push_back(Scripted::Pending(receiver));
        sender
    }

    pub fn requests(&self) -> Vec<(Coordinate, Coordinate)> {
        self.requests.lock().clone()
    }
}

impl RouteProvider for ScriptedRouteProvider {
    async fn fetch_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<FetchedRoute>, RoutingError> {
        self.requests.lock().push((origin, destination));
        let next = self.script.lock().pop_front();

        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Pending(receiver)) => receiver.await.unwrap_or(Err(RoutingError::NoRoutes)),
            None => Err(RoutingError::NoRoutes),
        }
    }
}
