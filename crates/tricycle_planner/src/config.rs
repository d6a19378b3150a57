use thiserror::Error;
use tricycle_fare::fare_model_client::FareModelClientParams;
use tricycle_routing::{geocoding::NominatimClientParams, osrm::OsrmRouteClientParams};

pub const OSRM_URL_ENV_VAR: &str = "TRICYCLE_OSRM_URL";
pub const OSRM_PROFILE_ENV_VAR: &str = "TRICYCLE_OSRM_PROFILE";
pub const GEOCODER_URL_ENV_VAR: &str = "TRICYCLE_GEOCODER_URL";
pub const GEOCODER_LIMIT_ENV_VAR: &str = "TRICYCLE_GEOCODER_LIMIT";
pub const GEOCODER_COUNTRY_ENV_VAR: &str = "TRICYCLE_GEOCODER_COUNTRY";
pub const FARE_API_URL_ENV_VAR: &str = "TRICYCLE_FARE_API_URL";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Where the three collaborating services live.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub osrm_url: String,
    pub osrm_profile: String,
    pub geocoder_url: String,
    pub geocoder_limit: u32,
    pub geocoder_country_codes: Option<String>,
    pub fare_api_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            osrm_url: String::from("https://router.project-osrm.org"),
            osrm_profile: String::from("driving"),
            geocoder_url: String::from("https://nominatim.openstreetmap.org"),
            geocoder_limit: 5,
            geocoder_country_codes: Some(String::from("ph")),
            fare_api_url: String::from("http://localhost:5000"),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset or blank variables fall back to the defaults. A blank country
    /// filter disables it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServiceConfig::default();
        let value = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let geocoder_limit = match value(GEOCODER_LIMIT_ENV_VAR) {
            Some(limit) => limit
                .parse::<u32>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidNumber {
                    name: GEOCODER_LIMIT_ENV_VAR,
                    value: limit,
                })?,
            None => defaults.geocoder_limit,
        };

        let geocoder_country_codes = match lookup(GEOCODER_COUNTRY_ENV_VAR) {
            Some(codes) if codes.trim().is_empty() => None,
            Some(codes) => Some(codes.trim().to_string()),
            None => defaults.geocoder_country_codes,
        };

        Ok(ServiceConfig {
            osrm_url: value(OSRM_URL_ENV_VAR).unwrap_or(defaults.osrm_url),
            osrm_profile: value(OSRM_PROFILE_ENV_VAR).unwrap_or(defaults.osrm_profile),
            geocoder_url: value(GEOCODER_URL_ENV_VAR).unwrap_or(defaults.geocoder_url),
            geocoder_limit,
            geocoder_country_codes,
            fare_api_url: value(FARE_API_URL_ENV_VAR).unwrap_or(defaults.fare_api_url),
        })
    }

    pub fn osrm_params(&self) -> OsrmRouteClientParams {
        OsrmRouteClientParams {
            osrm_url: self.osrm_url.clone(),
            profile: self.osrm_profile.clone(),
        }
    }

    pub fn geocoder_params(&self) -> NominatimClientParams {
        NominatimClientParams {
            geocoder_url: self.geocoder_url.clone(),
            limit: self.geocoder_limit,
            country_codes: self.geocoder_country_codes.clone(),
        }
    }

    pub fn fare_model_params(&self) -> FareModelClientParams {
        FareModelClientParams {
            fare_api_url: self.fare_api_url.clone(),
        }
    }
}
