use tricycle_fare::fare_request::{FEATURE_NAMES, FareRequest};

pub fn run() -> Result<(), anyhow::Error> {
    let schema = serde_json::to_string_pretty(&FareRequest::json_schema())?;
    println!("{schema}");
    println!("Model features: {}", FEATURE_NAMES.join(", "));

    Ok(())
}
