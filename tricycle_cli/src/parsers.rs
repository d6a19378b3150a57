use tricycle_fare::trip_conditions::FuelPriceBand;

/// Accepts the band with or without the peso sign, e.g. "60-69" or "₱60-69".
pub fn parse_fuel_price(input: &str) -> Result<FuelPriceBand, String> {
    let input = input.trim();
    let band = if input.starts_with('₱') {
        input.to_string()
    } else {
        format!("₱{input}")
    };

    band.parse::<FuelPriceBand>().map_err(|_| {
        let accepted: Vec<&str> = FuelPriceBand::ALL.iter().map(|b| b.as_str()).collect();
        format!("Invalid fuel price '{input}', expected one of {}", accepted.join(", "))
    })
}
