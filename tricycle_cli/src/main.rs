use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tricycle_planner::{config::ServiceConfig, trip_planner::ServiceTripPlanner};

use crate::{estimate::EstimateArgs, trip::TripArgs};

mod estimate;
mod parsers;
mod schema;
mod search;
mod status;
mod trip;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the fare of one route between two points
    #[command(visible_alias = "e")]
    Estimate {
        #[command(flatten)]
        args: EstimateArgs,
    },
    /// List the route alternatives between two points
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        trip: TripArgs,
    },
    /// Look a destination up by name
    Search { query: String },
    /// Probe the fare model service
    Status,
    /// Print the JSON schema of the fare request body
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = ServiceConfig::from_env()?;

    match cli.command {
        Some(Commands::Estimate { args }) => {
            let planner = ServiceTripPlanner::from_config(&config)?;
            estimate::run(&planner, args).await?
        }
        Some(Commands::Routes { trip }) => {
            let planner = ServiceTripPlanner::from_config(&config)?;
            trip::plan(&planner, &trip).await?;
            trip::print_routes(&planner);
        }
        Some(Commands::Search { query }) => {
            let planner = ServiceTripPlanner::from_config(&config)?;
            search::run(&planner, &query).await?
        }
        Some(Commands::Status) => {
            let planner = ServiceTripPlanner::from_config(&config)?;
            status::run(&planner).await?
        }
        Some(Commands::Schema) => schema::run()?,
        None => {
            // Handle no command provided
        }
    }

    Ok(())
}
