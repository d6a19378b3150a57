use std::time::Duration;

use anyhow::bail;
use clap::Args;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tricycle_planner::trip_planner::ServiceTripPlanner;
use tricycle_routing::{
    coordinate::Coordinate,
    destination_search::SearchOutcome,
    route_candidate::format_distance_km,
    route_candidate_manager::RouteRefresh,
};

#[derive(Args)]
pub struct TripArgs {
    /// Origin as "lat,lng"
    #[arg(short, long)]
    from: Coordinate,

    /// Destination as "lat,lng"
    #[arg(short, long, required_unless_present = "to_place", conflicts_with = "to_place")]
    to: Option<Coordinate>,

    /// Destination looked up by name, the first match is used
    #[arg(long)]
    to_place: Option<String>,
}

fn spinner(message: &'static str) -> Result<ProgressBar, anyhow::Error> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

/// Places the origin and the destination and waits for the route alternatives.
pub async fn plan(planner: &ServiceTripPlanner, args: &TripArgs) -> Result<(), anyhow::Error> {
    planner.move_origin(args.from).await?;

    let bar = spinner("Fetching routes")?;
    let refresh = match (&args.to, &args.to_place) {
        (Some(to), _) => {
            planner.toggle_mode();
            planner.click_map(*to).await
        }
        (None, Some(query)) => {
            let outcome = planner
                .search(query)
                .await
                .inspect_err(|_| bar.finish_and_clear())?;
            let SearchOutcome::Matches { places, source } = outcome else {
                bar.finish_and_clear();
                bail!("'{}' is too short to search for", query);
            };
            let Some(place) = places.first() else {
                bar.finish_and_clear();
                bail!("No place matches '{}'", query);
            };
            info!("Using {} ({:?}) as destination", place.display_name, source);
            planner.choose_destination(place).await
        }
        (None, None) => {
            bar.finish_and_clear();
            bail!("A destination is required");
        }
    };
    bar.finish_and_clear();

    match refresh? {
        RouteRefresh::Applied { .. } => Ok(()),
        other => bail!("Routes were not refreshed: {:?}", other),
    }
}

pub fn print_routes(planner: &ServiceTripPlanner) {
    let route_set = planner.routes().route_set();

    let mut table = Table::new();
    table.set_header(vec!["", "#", "Distance", "Duration"]);
    for candidate in route_set.candidates() {
        let active = if candidate.index() == route_set.active_index() {
            "*"
        } else {
            ""
        };
        let duration = jiff::SignedDuration::from_secs(candidate.duration().as_secs());

        table.add_row(vec![
            active.to_string(),
            candidate.index().to_string(),
            format_distance_km(candidate.distance_km()),
            format!("{:#}", duration),
        ]);
    }

    println!("{table}");
}
