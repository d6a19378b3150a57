pub mod config;
pub mod placement_mode;
pub mod trip_planner;
