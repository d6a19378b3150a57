use comfy_table::Table;
use tricycle_planner::trip_planner::ServiceTripPlanner;
use tricycle_routing::destination_search::SearchOutcome;

pub async fn run(planner: &ServiceTripPlanner, query: &str) -> Result<(), anyhow::Error> {
    match planner.search(query).await? {
        SearchOutcome::QueryTooShort => {
            println!("Type at least two characters to search");
        }
        SearchOutcome::Matches { source, places } => {
            let mut table = Table::new();
            table.set_header(vec!["Name", "Category", "Coordinate"]);
            for place in &places {
                table.add_row(vec![
                    place.display_name.clone(),
                    place.category.clone(),
                    place.coordinate.to_string(),
                ]);
            }

            println!("{:?} matches", source);
            println!("{table}");
        }
    }

    Ok(())
}
