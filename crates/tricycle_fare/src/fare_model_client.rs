use std::{collections::BTreeMap, future::Future};

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{error::FareError, fare_estimate::FareEstimate, fare_request::FareRequest};

/// A trained model turning a fare request into a fare.
pub trait FareModel {
    fn predict(
        &self,
        request: &FareRequest,
    ) -> impl Future<Output = Result<FareEstimate, FareError>> + Send;
}

pub struct FareModelClientParams {
    pub fare_api_url: String,
}

pub const PREDICT_API_PATH: &str = "/predict";
pub const HEALTH_API_PATH: &str = "/health";

/// Answer of the informational `GET /` probe.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelHealth {
    pub status: String,
    pub model_status: String,
    #[serde(default)]
    pub api_version: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    details: Option<String>,
}

pub struct FareModelClient {
    params: FareModelClientParams,
    client: reqwest::Client,
}

fn unreachable(error: reqwest::Error) -> FareError {
    warn!("FareModelClient: No response from fare service: {}", error);
    FareError::ServiceUnreachable
}

fn rejection(status: StatusCode, body: &str) -> FareError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: Some(message),
            details,
        }) if !message.trim().is_empty() => {
            if let Some(details) = details {
                warn!("FareModelClient: {} ({})", message, details);
            }
            FareError::ServiceRejected(message)
        }
        _ => FareError::ServiceRejected(format!("Fare service responded with status {status}")),
    }
}

fn parse_prediction(body: &str) -> Result<FareEstimate, FareError> {
    let response: serde_json::Value = serde_json::from_str(body)
        .map_err(|error| FareError::MalformedResponse(error.to_string()))?;

    let fare = response
        .get("predicted_fare")
        .ok_or_else(|| FareError::MalformedResponse(String::from("missing predicted_fare")))?;

    let amount = fare.as_f64().ok_or_else(|| {
        FareError::MalformedResponse(format!("predicted_fare is not a number: {fare}"))
    })?;

    FareEstimate::new(amount)
}

impl FareModelClient {
    pub fn new(params: FareModelClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.params.fare_api_url.trim_end_matches('/'), path)
    }

    /// Sends the request and returns the body of a 2xx answer. Anything else is
    /// classified into a [`FareError`].
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, FareError> {
        let response = request.send().await.map_err(unreachable)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| FareError::MalformedResponse(error.to_string()))?;

        debug!("FareModelClient: {} {}", status, body);

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        Ok(body)
    }

    pub async fn status(&self) -> Result<ServiceStatus, FareError> {
        let body = self.execute(self.client.get(self.url("/"))).await?;

        serde_json::from_str(&body).map_err(|error| FareError::MalformedResponse(error.to_string()))
    }

    pub async fn health(&self) -> Result<ModelHealth, FareError> {
        let body = self
            .execute(self.client.get(self.url(HEALTH_API_PATH)))
            .await?;

        serde_json::from_str(&body).map_err(|error| FareError::MalformedResponse(error.to_string()))
    }
}

impl FareModel for FareModelClient {
    async fn predict(&self, request: &FareRequest) -> Result<FareEstimate, FareError> {
        let body = self
            .execute(self.client.post(self.url(PREDICT_API_PATH)).json(request))
            .await?;

        parse_prediction(&body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use super::*;
    use crate::{
        fare_request::validate,
        trip_conditions::{FuelPriceBand, TimeOfDay, TripConditions, VehicleType, Weather},
    };

    fn client(url: String) -> FareModelClient {
        FareModelClient::new(FareModelClientParams { fare_api_url: url })
    }

    fn request() -> FareRequest {
        validate(
            Some(5.23),
            &TripConditions::new(
                FuelPriceBand::From60To69,
                TimeOfDay::OffPeak,
                Weather::Sunny,
                VehicleType::Tricycle,
            ),
        )
        .unwrap()
    }

    async fn respond(template: ResponseTemplate) -> (MockServer, FareModelClient) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(template)
            .mount(&server)
            .await;
        let client = client(server.uri());
        (server, client)
    }

    #[tokio::test]
    async fn test_predict_posts_wire_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(json!({
                "Distance_km": 5.23,
                "Fuel_Price": "₱60-69",
                "Time_of_Day": "Off-Peak",
                "Weather": "Sunny",
                "Vehicle_Type": "Tricycle"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "predicted_fare": 45.5,
                "input": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let estimate = client(server.uri()).predict(&request()).await.unwrap();

        assert_eq!(estimate.amount_php(), 45.5);
        assert_eq!(estimate.to_string(), "₱46");
    }

    #[tokio::test]
    async fn test_zero_fare_is_valid() {
        let (_server, client) =
            respond(ResponseTemplate::new(200).set_body_json(json!({ "predicted_fare": 0 }))).await;

        assert_eq!(client.predict(&request()).await.unwrap().amount_php(), 0.0);
    }

    #[tokio::test]
    async fn test_missing_or_non_numeric_fare_is_malformed() {
        for body in [
            json!({ "input": {} }),
            json!({ "predicted_fare": "45.5" }),
            json!({ "predicted_fare": null }),
            json!({ "predicted_fare": -3.0 }),
        ] {
            let (_server, client) = respond(ResponseTemplate::new(200).set_body_json(body)).await;

            assert!(matches!(
                client.predict(&request()).await,
                Err(FareError::MalformedResponse(_))
            ));
        }

        let (_server, client) =
            respond(ResponseTemplate::new(200).set_body_string("not json")).await;
        assert!(matches!(
            client.predict(&request()).await,
            Err(FareError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_rejection_uses_error_message() {
        let (_server, client) = respond(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Missing required field" })),
        )
        .await;

        assert_eq!(
            client.predict(&request()).await,
            Err(FareError::ServiceRejected(String::from(
                "Missing required field"
            )))
        );
    }

    #[tokio::test]
    async fn test_rejection_keeps_error_over_details() {
        let (_server, client) = respond(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal server error during prediction",
            "details": "could not convert string to float"
        })))
        .await;

        assert_eq!(
            client.predict(&request()).await,
            Err(FareError::ServiceRejected(String::from(
                "Internal server error during prediction"
            )))
        );
    }

    #[tokio::test]
    async fn test_rejection_without_message_is_generic() {
        let (_server, client) =
            respond(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>")).await;

        assert_eq!(
            client.predict(&request()).await,
            Err(FareError::ServiceRejected(String::from(
                "Fare service responded with status 502 Bad Gateway"
            )))
        );
    }

    #[tokio::test]
    async fn test_unreachable() {
        // Nothing listens on the discard port
        let client = client(String::from("http://127.0.0.1:9"));

        assert_eq!(
            client.predict(&request()).await,
            Err(FareError::ServiceUnreachable)
        );
    }

    #[tokio::test]
    async fn test_status_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "online",
                "message": "Tricycle Fare Optimizer API",
                "version": "1.0.0",
                "endpoints": { "/predict": "POST - Predict tricycle fare" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "healthy",
                "model_status": "loaded",
                "api_version": "1.0.0"
            })))
            .mount(&server)
            .await;

        let client = client(server.uri());
        let status = client.status().await.unwrap();
        let health = client.health().await.unwrap();

        assert_eq!(status.status, "online");
        assert_eq!(status.version.as_deref(), Some("1.0.0"));
        assert!(status.endpoints.contains_key("/predict"));
        assert_eq!(health.model_status, "loaded");
    }
}
