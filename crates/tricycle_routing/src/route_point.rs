use crate::coordinate::Coordinate;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointRole {
    Origin,
    Destination,
}

/// A placed point on the map, tagged with the role it plays in the trip.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RoutePoint {
    Origin(Coordinate),
    Destination(Coordinate),
}

impl RoutePoint {
    pub fn new(role: PointRole, coordinate: Coordinate) -> Self {
        match role {
            PointRole::Origin => RoutePoint::Origin(coordinate),
            PointRole::Destination => RoutePoint::Destination(coordinate),
        }
    }

    pub fn role(&self) -> PointRole {
        match self {
            RoutePoint::Origin(_) => PointRole::Origin,
            RoutePoint::Destination(_) => PointRole::Destination,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        match self {
            RoutePoint::Origin(coordinate) | RoutePoint::Destination(coordinate) => *coordinate,
        }
    }
}
