use crate::{coordinate::Coordinate, geocoding::Place};

pub struct PointOfInterest {
    pub name: &'static str,
    pub category: &'static str,
    pub coordinate: Coordinate,
}

const fn poi(name: &'static str, category: &'static str, lat: f64, lng: f64) -> PointOfInterest {
    PointOfInterest {
        name,
        category,
        coordinate: Coordinate::from_valid(lat, lng),
    }
}

/// Landmarks around Tagum City searched before the geocoder is asked.
pub const TAGUM_POINTS_OF_INTEREST: &[PointOfInterest] = &[
    poi("Gaisano Mall of Tagum", "mall", 7.4479, 125.8097),
    poi("NCCC Mall Tagum", "mall", 7.4436, 125.8056),
    poi("Tagum City Hall", "government", 7.4474, 125.8075),
    poi("Rotary Park", "park", 7.4491, 125.8075),
    poi("Tagum City Public Market", "market", 7.4497, 125.8061),
    poi("Tagum City Overland Terminal", "terminal", 7.4421, 125.8136),
    poi("Christ the King Cathedral", "church", 7.4481, 125.8056),
    poi("UM Tagum College", "school", 7.4483, 125.8015),
    poi("Davao Regional Medical Center", "hospital", 7.4436, 125.8210),
    poi("Tagum Doctors Hospital", "hospital", 7.4452, 125.8031),
];

pub struct LocalPlaces {
    points: &'static [PointOfInterest],
}

impl Default for LocalPlaces {
    fn default() -> Self {
        Self::new(TAGUM_POINTS_OF_INTEREST)
    }
}

impl LocalPlaces {
    pub fn new(points: &'static [PointOfInterest]) -> Self {
        Self { points }
    }

    /// Case insensitive substring match on the name or the category.
    pub fn matching(&self, query: &str) -> Vec<Place> {
        let query = query.to_lowercase();

        self.points
            .iter()
            .filter(|point| {
                point.name.to_lowercase().contains(&query)
                    || point.category.to_lowercase().contains(&query)
            })
            .map(|point| Place {
                coordinate: point.coordinate,
                display_name: point.name.to_string(),
                category: point.category.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_category() {
        let places = LocalPlaces::default().matching("mall");
        let names: Vec<&str> = places.iter().map(|p| p.display_name.as_str()).collect();

        assert_eq!(names, vec!["Gaisano Mall of Tagum", "NCCC Mall Tagum"]);
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let places = LocalPlaces::default().matching("CATHEDRAL");

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].category, "church");
    }

    #[test]
    fn test_no_match() {
        assert!(LocalPlaces::default().matching("airport").is_empty());
    }

    #[test]
    fn test_built_in_coordinates_are_valid() {
        for point in TAGUM_POINTS_OF_INTEREST {
            let coordinate = point.coordinate;
            assert!(Coordinate::new(coordinate.lat(), coordinate.lng()).is_ok());
        }
    }
}
