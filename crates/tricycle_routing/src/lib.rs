pub mod coordinate;
pub mod destination_search;
pub mod error;
pub mod geocoding;
pub mod osrm;
pub mod points_of_interest;
pub mod route_candidate;
pub mod route_candidate_manager;
pub mod route_point;
pub mod route_provider;

#[cfg(test)]
pub(crate) mod test_utils;
