use tricycle_routing::{
    coordinate::Coordinate,
    route_point::{PointRole, RoutePoint},
};

/// What a click on the map places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlacementMode {
    #[default]
    PlacingOrigin,
    PlacingDestination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementEvent {
    /// The user pressed the mode toggle
    Toggle,

    /// A point was placed with the current mode
    Placed,
}

impl PlacementMode {
    pub fn role(self) -> PointRole {
        match self {
            PlacementMode::PlacingOrigin => PointRole::Origin,
            PlacementMode::PlacingDestination => PointRole::Destination,
        }
    }

    pub fn point_at(self, coordinate: Coordinate) -> RoutePoint {
        RoutePoint::new(self.role(), coordinate)
    }

    /// Placing a destination hands the map back to origin placement; placing an
    /// origin keeps the mode.
    pub fn transition(self, event: PlacementEvent) -> Self {
        match (self, event) {
            (PlacementMode::PlacingOrigin, PlacementEvent::Toggle) => {
                PlacementMode::PlacingDestination
            }
            (PlacementMode::PlacingDestination, PlacementEvent::Toggle) => {
                PlacementMode::PlacingOrigin
            }
            (PlacementMode::PlacingOrigin, PlacementEvent::Placed) => PlacementMode::PlacingOrigin,
            (PlacementMode::PlacingDestination, PlacementEvent::Placed) => {
                PlacementMode::PlacingOrigin
            }
        }
    }
}
