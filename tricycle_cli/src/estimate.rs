use anyhow::bail;
use clap::Args;
use tricycle_fare::trip_conditions::{
    FuelPriceBand, TimeOfDay, TripConditions, VehicleType, Weather,
};
use tricycle_planner::trip_planner::ServiceTripPlanner;
use tricycle_routing::route_candidate::format_distance_km;

use crate::{
    parsers,
    trip::{self, TripArgs},
};

#[derive(Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    trip: TripArgs,

    /// Route alternative to price, 0 is the one the routing service ranked first
    #[arg(short, long, default_value_t = 0)]
    route: usize,

    /// Fuel price band, e.g. "60-69" or "100&up"
    #[arg(long, value_parser = parsers::parse_fuel_price)]
    fuel_price: FuelPriceBand,

    /// "Rush Hour Morning", "Off-Peak" or "Rush Hour Evening"
    #[arg(long)]
    time_of_day: TimeOfDay,

    /// "Sunny" or "Rainy"
    #[arg(long)]
    weather: Weather,

    /// "Single Motor" or "Tricycle"
    #[arg(long)]
    vehicle: VehicleType,
}

pub async fn run(planner: &ServiceTripPlanner, args: EstimateArgs) -> Result<(), anyhow::Error> {
    planner.set_conditions(TripConditions::new(
        args.fuel_price,
        args.time_of_day,
        args.weather,
        args.vehicle,
    ));

    trip::plan(planner, &args.trip).await?;

    let candidates = planner.routes().route_set().len();
    if args.route >= candidates {
        bail!(
            "Route {} does not exist, {} alternative(s) were found",
            args.route,
            candidates
        );
    }
    planner.select_route(args.route);
    trip::print_routes(planner);

    let estimate = planner.submit_fare().await?;
    let distance_km = planner.routes().active_distance_km().unwrap_or_default();

    println!(
        "Estimated fare: {} for {}",
        estimate,
        format_distance_km(distance_km)
    );

    Ok(())
}
