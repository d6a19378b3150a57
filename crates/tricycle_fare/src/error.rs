use std::fmt::Display;

use thiserror::Error;

/// The inputs of a fare request, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FareField {
    Distance,
    FuelPrice,
    TimeOfDay,
    Weather,
    VehicleType,
}

impl FareField {
    pub const ORDER: [FareField; 5] = [
        FareField::Distance,
        FareField::FuelPrice,
        FareField::TimeOfDay,
        FareField::Weather,
        FareField::VehicleType,
    ];

    /// Field name in the fare model's request body
    pub fn wire_name(&self) -> &'static str {
        match self {
            FareField::Distance => "Distance_km",
            FareField::FuelPrice => "Fuel_Price",
            FareField::TimeOfDay => "Time_of_Day",
            FareField::Weather => "Weather",
            FareField::VehicleType => "Vehicle_Type",
        }
    }
}

impl Display for FareField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FareField::Distance => "distance",
                FareField::FuelPrice => "fuel price",
                FareField::TimeOfDay => "time of day",
                FareField::Weather => "weather",
                FareField::VehicleType => "vehicle type",
            }
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FareError {
    #[error("Missing {0}")]
    IncompleteInput(FareField),

    #[error("Distance must be a positive number of kilometers, got {0}")]
    InvalidDistance(f64),

    #[error("Fare service rejected the request: {0}")]
    ServiceRejected(String),

    #[error("Fare service is unreachable")]
    ServiceUnreachable,

    #[error("Malformed fare service response: {0}")]
    MalformedResponse(String),

    #[error("A fare request is already in flight")]
    SubmissionInFlight,
}
