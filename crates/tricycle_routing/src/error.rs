use thiserror::Error;

use crate::coordinate::CoordinateError;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Routing service answered {code}: {message}")]
    Service { code: String, message: String },

    #[error("Routing service returned no routes")]
    NoRoutes,

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Invalid geometry: {0}")]
    Geometry(#[from] CoordinateError),

    #[error("Both an origin and a destination are required")]
    MissingEndpoints,
}

/// The only failure the route candidate manager reports. The previous route set
/// is left untouched whenever this is returned.
#[derive(Debug, Error)]
#[error("No route available: {0}")]
pub struct RouteUnavailable(#[from] pub RoutingError);
