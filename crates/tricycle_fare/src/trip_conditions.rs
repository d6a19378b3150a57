use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown {field} '{value}'")]
pub struct UnknownCondition {
    pub field: &'static str,
    pub value: String,
}

/// Declares a closed set of categorical values. The wire string of each variant
/// is forwarded verbatim to the fare model and parsed with an exact,
/// case sensitive match. The encoding is the label the model was trained with.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, {
            $($variant:ident => ($label:literal, $encoding:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn encoding(&self) -> u8 {
                match self {
                    $($name::$variant => $encoding,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownCondition;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == input)
                    .ok_or_else(|| UnknownCondition {
                        field: $field,
                        value: input.to_string(),
                    })
            }
        }
    };
}

categorical!(
    /// Discretized fuel cost in pesos per liter.
    FuelPriceBand, "fuel price", {
        From20To29 => ("₱20-29", 1),
        From30To39 => ("₱30-39", 2),
        From40To49 => ("₱40-49", 3),
        From50To59 => ("₱50-59", 4),
        From60To69 => ("₱60-69", 5),
        From70To79 => ("₱70-79", 6),
        From80To89 => ("₱80-89", 7),
        From90To99 => ("₱90-99", 8),
        From100Up => ("₱100&up", 0),
    }
);

categorical!(
    TimeOfDay, "time of day", {
        RushHourMorning => ("Rush Hour Morning", 2),
        OffPeak => ("Off-Peak", 0),
        RushHourEvening => ("Rush Hour Evening", 1),
    }
);

categorical!(
    Weather, "weather", {
        Sunny => ("Sunny", 1),
        Rainy => ("Rainy", 0),
    }
);

categorical!(
    VehicleType, "vehicle type", {
        SingleMotor => ("Single Motor", 0),
        Tricycle => ("Tricycle", 1),
    }
);

/// The user selected trip inputs. A field is `None` until the user picks a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripConditions {
    pub fuel_price_band: Option<FuelPriceBand>,
    pub time_of_day: Option<TimeOfDay>,
    pub weather: Option<Weather>,
    pub vehicle_type: Option<VehicleType>,
}

fn selection<T: FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    if value.trim().is_empty() {
        return Ok(None);
    }

    value.parse().map(Some)
}

impl TripConditions {
    pub fn new(
        fuel_price_band: FuelPriceBand,
        time_of_day: TimeOfDay,
        weather: Weather,
        vehicle_type: VehicleType,
    ) -> Self {
        TripConditions {
            fuel_price_band: Some(fuel_price_band),
            time_of_day: Some(time_of_day),
            weather: Some(weather),
            vehicle_type: Some(vehicle_type),
        }
    }

    /// Builds conditions from raw form selections. Empty selections stay unset.
    pub fn from_selections(
        fuel_price_band: &str,
        time_of_day: &str,
        weather: &str,
        vehicle_type: &str,
    ) -> Result<Self, UnknownCondition> {
        Ok(TripConditions {
            fuel_price_band: selection(fuel_price_band)?,
            time_of_day: selection(time_of_day)?,
            weather: selection(weather)?,
            vehicle_type: selection(vehicle_type)?,
        })
    }
}
