pub mod error;
pub mod fare_estimate;
pub mod fare_model_client;
pub mod fare_request;
pub mod fare_request_builder;
pub mod trip_conditions;
