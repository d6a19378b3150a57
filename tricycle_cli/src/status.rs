use tracing::warn;
use tricycle_planner::trip_planner::ServiceTripPlanner;

pub async fn run(planner: &ServiceTripPlanner) -> Result<(), anyhow::Error> {
    let client = planner.fares().model();

    let status = client.status().await?;
    println!(
        "{} {} ({})",
        status.message.as_deref().unwrap_or("Fare service"),
        status.version.as_deref().unwrap_or("unknown version"),
        status.status
    );
    for (endpoint, description) in &status.endpoints {
        println!("  {endpoint}: {description}");
    }

    // Older deployments only expose the root probe
    match client.health().await {
        Ok(health) => println!("Model: {}", health.model_status),
        Err(error) => warn!("Health endpoint unavailable: {}", error),
    }

    Ok(())
}
