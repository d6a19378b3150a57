use serde::Deserialize;
use tracing::debug;

use crate::{
    coordinate::Coordinate, error::RoutingError, route_candidate::FetchedRoute,
    route_provider::RouteProvider,
};

pub struct OsrmRouteClientParams {
    pub osrm_url: String,

    /// OSRM profile segment of the URL, e.g. "driving"
    pub profile: String,
}

pub const OSRM_ROUTE_API_PATH: &str = "/route/v1/";

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,

    /// Distance in meters
    distance: f64,

    /// Duration in seconds
    duration: f64,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// GeoJSON positions, [lng, lat]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct OsrmErrorResponse {
    code: Option<String>,
    message: Option<String>,
}

pub struct OsrmRouteClient {
    params: OsrmRouteClientParams,
    client: reqwest::Client,
}

impl OsrmRouteClient {
    pub fn new(params: OsrmRouteClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    fn route_url(&self, origin: &Coordinate, destination: &Coordinate) -> String {
        let mut url = self.params.osrm_url.trim_end_matches('/').to_string();
        url.push_str(OSRM_ROUTE_API_PATH);
        url.push_str(&self.params.profile);
        url.push('/');

        // OSRM expects lng,lat pairs
        url.push_str(&format!(
            "{},{};{},{}",
            origin.lng(),
            origin.lat(),
            destination.lng(),
            destination.lat()
        ));

        url
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Vec<FetchedRoute>, RoutingError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OsrmErrorResponse>(&body)
                .ok()
                .and_then(|error| match (error.code, error.message) {
                    (Some(code), Some(message)) => Some(format!("{code}: {message}")),
                    (code, message) => code.or(message),
                })
                .unwrap_or(body);

            return Err(RoutingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: OsrmRouteResponse = serde_json::from_str(&body)?;

        if response.code != "Ok" {
            return Err(RoutingError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        if response.routes.is_empty() {
            return Err(RoutingError::NoRoutes);
        }

        response
            .routes
            .into_iter()
            .map(|route| -> Result<FetchedRoute, RoutingError> {
                let geometry = route
                    .geometry
                    .coordinates
                    .into_iter()
                    .map(|[lng, lat]| Coordinate::new(lat, lng))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(FetchedRoute {
                    geometry,
                    distance_meters: route.distance,
                    duration_seconds: route.duration,
                })
            })
            .collect()
    }
}

impl RouteProvider for OsrmRouteClient {
    async fn fetch_routes(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<FetchedRoute>, RoutingError> {
        let url = self.route_url(&origin, &destination);

        debug!("OsrmRouteClient: Requesting alternatives {}", url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("alternatives", "true"),
                ("geometries", "geojson"),
                ("overview", "full"),
                ("steps", "false"),
            ])
            .send()
            .await?;

        let routes = self.handle_response(response).await?;

        debug!("OsrmRouteClient: Received {} route(s)", routes.len());

        Ok(routes)
    }
}
