use std::future::Future;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::coordinate::Coordinate;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Invalid coordinate in geocoding result: {0}")]
    InvalidCoordinate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub coordinate: Coordinate,
    pub display_name: String,
    pub category: String,
}

/// Resolves free text to candidate places, best match first.
pub trait Geocoder {
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Place>, GeocodingError>> + Send;
}

pub struct NominatimClientParams {
    pub geocoder_url: String,

    /// Maximum number of results requested
    pub limit: u32,

    /// Comma separated ISO 3166-1 alpha-2 codes restricting the search
    pub country_codes: Option<String>,
}

pub const NOMINATIM_SEARCH_API_PATH: &str = "/search";

const USER_AGENT: &str = concat!("tricycle-fare/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    category: String,
}

pub struct NominatimClient {
    params: NominatimClientParams,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(params: NominatimClientParams) -> Result<Self, GeocodingError> {
        // Nominatim's usage policy rejects requests without an identifying agent
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { params, client })
    }

    fn to_place(place: NominatimPlace) -> Result<Place, GeocodingError> {
        let invalid = || GeocodingError::InvalidCoordinate(format!("{},{}", place.lat, place.lon));

        let lat = place.lat.parse::<f64>().map_err(|_| invalid())?;
        let lng = place.lon.parse::<f64>().map_err(|_| invalid())?;
        let coordinate = Coordinate::new(lat, lng).map_err(|_| invalid())?;

        Ok(Place {
            coordinate,
            display_name: place.display_name,
            category: place.category,
        })
    }
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Vec<Place>, GeocodingError> {
        let url = format!(
            "{}{}",
            self.params.geocoder_url.trim_end_matches('/'),
            NOMINATIM_SEARCH_API_PATH
        );
        let limit = self.params.limit.to_string();

        let mut request = self
            .client
            .get(url)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", limit.as_str())]);
        if let Some(country_codes) = &self.params.country_codes {
            request = request.query(&[("countrycodes", country_codes)]);
        }

        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GeocodingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let places: Vec<NominatimPlace> = serde_json::from_str(&body)?;

        debug!("NominatimClient: {} result(s) for '{}'", places.len(), query);

        places.into_iter().map(Self::to_place).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    fn client(server: &MockServer) -> NominatimClient {
        NominatimClient::new(NominatimClientParams {
            geocoder_url: server.uri(),
            limit: 5,
            country_codes: Some(String::from("ph")),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_geocode_parses_places() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Magugpo Poblacion"))
            .and(query_param("format", "jsonv2"))
            .and(query_param("limit", "5"))
            .and(query_param("countrycodes", "ph"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "place_id": 1,
                    "lat": "7.4486",
                    "lon": "125.8070",
                    "category": "boundary",
                    "type": "administrative",
                    "display_name": "Magugpo Poblacion, Tagum, Davao del Norte, Philippines"
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let places = client(&server).geocode("Magugpo Poblacion").await.unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].coordinate, Coordinate::new(7.4486, 125.807).unwrap());
        assert_eq!(places[0].category, "boundary");
        assert!(places[0].display_name.starts_with("Magugpo Poblacion"));
    }

    #[tokio::test]
    async fn test_geocode_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Access blocked"))
            .mount(&server)
            .await;

        let result = client(&server).geocode("Apokon").await;

        assert!(matches!(
            result,
            Err(GeocodingError::Api { status: 403, ref message }) if message == "Access blocked"
        ));
    }

    #[tokio::test]
    async fn test_geocode_invalid_coordinate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "lat": "north", "lon": "125.8", "display_name": "Somewhere" }
            ])))
            .mount(&server)
            .await;

        let result = client(&server).geocode("Somewhere").await;

        assert!(matches!(result, Err(GeocodingError::InvalidCoordinate(_))));
    }
}
