use std::{fmt::Display, str::FromStr};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside of [-90, 90]")]
    Latitude(f64),

    #[error("Longitude {0} is outside of [-180, 180]")]
    Longitude(f64),

    #[error("Invalid coordinate '{0}', expected 'lat,lng'")]
    Parse(String),
}

/// A WGS84 position. Values are validated on construction and never mutated
/// afterwards; moving a point means building a new coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::Longitude(lng));
        }

        Ok(Coordinate { lat, lng })
    }

    /// Caller guarantees the values are in range, used for the built-in place list.
    pub(crate) const fn from_valid(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl From<&Coordinate> for geo_types::Point {
    fn from(coordinate: &Coordinate) -> Self {
        geo_types::Point::new(coordinate.lng, coordinate.lat)
    }
}

impl From<&Coordinate> for geo_types::Coord {
    fn from(coordinate: &Coordinate) -> Self {
        geo_types::coord! { x: coordinate.lng, y: coordinate.lat }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = input
            .split_once(',')
            .ok_or_else(|| CoordinateError::Parse(input.to_string()))?;

        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordinateError::Parse(input.to_string()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordinateError::Parse(input.to_string()))?;

        Coordinate::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.1),
            Err(CoordinateError::Longitude(-180.1))
        );
    }

    #[test]
    fn test_rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_parse() {
        let coordinate: Coordinate = "7.4478, 125.8078".parse().unwrap();
        assert_eq!(coordinate.lat(), 7.4478);
        assert_eq!(coordinate.lng(), 125.8078);

        assert!(matches!(
            "7.4478".parse::<Coordinate>(),
            Err(CoordinateError::Parse(_))
        ));
        assert!(matches!(
            "95.0,120.0".parse::<Coordinate>(),
            Err(CoordinateError::Latitude(_))
        ));
    }

    #[test]
    fn test_point_is_lng_lat() {
        let coordinate = Coordinate::new(7.4, 125.8).unwrap();
        let point: geo_types::Point = (&coordinate).into();
        assert_eq!(point.x(), 125.8);
        assert_eq!(point.y(), 7.4);
    }
}
