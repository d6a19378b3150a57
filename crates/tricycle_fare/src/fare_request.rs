use schemars::{JsonSchema, Schema, schema_for};
use serde::Serialize;

use crate::{
    error::{FareError, FareField},
    trip_conditions::{FuelPriceBand, TimeOfDay, TripConditions, VehicleType, Weather},
};

/// Column names of [`FareRequest::features`], in order.
pub const FEATURE_NAMES: [&str; 5] = [
    "Distance_km",
    "Fuel_Price_encoded",
    "Time_of_Day_encoded",
    "Weather_encoded",
    "Vehicle_Type_encoded",
];

/// Body of `POST /predict`. Only built through [`validate`], so the distance is
/// always positive and every condition is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct FareRequest {
    #[serde(rename = "Distance_km")]
    distance_km: f64,

    #[serde(rename = "Fuel_Price")]
    fuel_price: FuelPriceBand,

    #[serde(rename = "Time_of_Day")]
    time_of_day: TimeOfDay,

    #[serde(rename = "Weather")]
    weather: Weather,

    #[serde(rename = "Vehicle_Type")]
    vehicle_type: VehicleType,
}

impl FareRequest {
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn fuel_price(&self) -> FuelPriceBand {
        self.fuel_price
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    /// Numeric features as the regression model sees them once the service has
    /// label encoded the categorical columns.
    pub fn features(&self) -> [f64; 5] {
        [
            self.distance_km,
            f64::from(self.fuel_price.encoding()),
            f64::from(self.time_of_day.encoding()),
            f64::from(self.weather.encoding()),
            f64::from(self.vehicle_type.encoding()),
        ]
    }

    pub fn json_schema() -> Schema {
        schema_for!(FareRequest)
    }
}

/// Checks the inputs in a fixed order: distance first, then fuel price, time of
/// day, weather and vehicle type. The first problem found is reported.
pub fn validate(
    distance_km: Option<f64>,
    conditions: &TripConditions,
) -> Result<FareRequest, FareError> {
    let distance_km = distance_km.ok_or(FareError::IncompleteInput(FareField::Distance))?;
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(FareError::InvalidDistance(distance_km));
    }

    Ok(FareRequest {
        distance_km,
        fuel_price: conditions
            .fuel_price_band
            .ok_or(FareError::IncompleteInput(FareField::FuelPrice))?,
        time_of_day: conditions
            .time_of_day
            .ok_or(FareError::IncompleteInput(FareField::TimeOfDay))?,
        weather: conditions
            .weather
            .ok_or(FareError::IncompleteInput(FareField::Weather))?,
        vehicle_type: conditions
            .vehicle_type
            .ok_or(FareError::IncompleteInput(FareField::VehicleType))?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn conditions() -> TripConditions {
        TripConditions::new(
            FuelPriceBand::From60To69,
            TimeOfDay::OffPeak,
            Weather::Sunny,
            VehicleType::Tricycle,
        )
    }

    #[test]
    fn test_rejects_non_positive_distance() {
        for distance in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate(Some(distance), &conditions()),
                Err(FareError::InvalidDistance(_))
            ));
        }

        let request = validate(Some(0.01), &conditions()).unwrap();
        assert_eq!(request.distance_km(), 0.01);
    }

    #[test]
    fn test_missing_distance_is_reported_first() {
        assert_eq!(
            validate(None, &TripConditions::default()),
            Err(FareError::IncompleteInput(FareField::Distance))
        );
    }

    #[test]
    fn test_missing_conditions_in_field_order() {
        let mut conditions = TripConditions::default();
        assert_eq!(
            validate(Some(5.0), &conditions),
            Err(FareError::IncompleteInput(FareField::FuelPrice))
        );

        conditions.weather = Some(Weather::Rainy);
        conditions.vehicle_type = Some(VehicleType::SingleMotor);
        conditions.fuel_price_band = Some(FuelPriceBand::From40To49);
        assert_eq!(
            validate(Some(5.0), &conditions),
            Err(FareError::IncompleteInput(FareField::TimeOfDay))
        );

        conditions.time_of_day = Some(TimeOfDay::RushHourEvening);
        conditions.weather = None;
        assert_eq!(
            validate(Some(5.0), &conditions),
            Err(FareError::IncompleteInput(FareField::Weather))
        );

        conditions.weather = Some(Weather::Rainy);
        conditions.vehicle_type = None;
        assert_eq!(
            validate(Some(5.0), &conditions),
            Err(FareError::IncompleteInput(FareField::VehicleType))
        );
    }

    #[test]
    fn test_wire_body_is_verbatim() {
        let request = validate(Some(5.23), &conditions()).unwrap();

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "Distance_km": 5.23,
                "Fuel_Price": "₱60-69",
                "Time_of_Day": "Off-Peak",
                "Weather": "Sunny",
                "Vehicle_Type": "Tricycle"
            })
        );
    }

    #[test]
    fn test_features_use_label_encoding() {
        let request = validate(Some(3.2), &conditions()).unwrap();
        assert_eq!(request.features(), [3.2, 5.0, 0.0, 1.0, 1.0]);

        let request = validate(
            Some(12.8),
            &TripConditions::new(
                FuelPriceBand::From100Up,
                TimeOfDay::RushHourMorning,
                Weather::Rainy,
                VehicleType::SingleMotor,
            ),
        )
        .unwrap();
        assert_eq!(request.features(), [12.8, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_schema_lists_wire_fields() {
        let schema = serde_json::to_value(FareRequest::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();

        for field in FareField::ORDER {
            assert!(properties.contains_key(field.wire_name()));
        }
    }
}
