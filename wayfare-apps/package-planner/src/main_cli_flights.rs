//!  Wayfare Package Planner
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! CLI for multi-leg flight search.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::cmp::max;
use term_size;
use wayfare_package_planner::{
    FlightOption, Itinerary, PackagePlanner, QpxFlightsClient, Segment, StaticAirlineDirectory,
};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "wayfare-flights")]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Total trip budget in whole USD
    #[arg(short, long)]
    budget: i64,

    /// Itinerary segment as ORIGIN:DEST:YYYY-MM-DD, repeat for each leg (max 5)
    #[arg(short, long = "segment", required = true)]
    segments: Vec<String>,

    /// Flight provider API key
    #[arg(long, env = "WAYFARE_FLIGHTS_API_KEY", default_value = "")]
    api_key: String,

    /// Provider request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,

    /// Verbose output
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

/// Configure logging based on verbosity level
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Parse one ORIGIN:DEST:YYYY-MM-DD argument
fn parse_segment(s: &str) -> Result<Segment> {
    let mut parts = s.splitn(3, ':');
    let origin = parts.next().unwrap_or_default();
    let destination = parts.next().unwrap_or_default();
    let date = parts.next().unwrap_or_default();
    anyhow::ensure!(
        !origin.is_empty() && !destination.is_empty() && !date.is_empty(),
        "Invalid segment: {}. Use ORIGIN:DEST:YYYY-MM-DD",
        s
    );
    let depart_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y/%m/%d"))
        .context(format!("Invalid date in segment {}: {}", s, date))?;
    Ok(Segment::new(
        origin.to_uppercase(),
        destination.to_uppercase(),
        depart_date,
    ))
}

/// Format duration in hours/minutes.
fn fmt_duration(minutes: i64) -> String {
    let hrs = minutes / 60;
    let mins = minutes % 60;
    if mins == 0 {
        format!("{}h", hrs)
    } else if hrs == 0 {
        format!("{}m", mins)
    } else {
        format!("{}h {:02}m", hrs, mins)
    }
}

/// Get terminal width for responsive tables
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(100)
}

fn dash_bar() -> String {
    "-".repeat(get_terminal_width().min(100))
}

/// Carrier of the first stop, for the summary column.
fn lead_carrier(option: &FlightOption) -> &str {
    option
        .trips
        .first()
        .and_then(|t| t.stops.first())
        .map(|s| s.carrier.as_str())
        .unwrap_or("??")
}

fn total_stops(option: &FlightOption) -> usize {
    option.trips.iter().map(|t| t.stops.len()).sum()
}

/// Render results to stdout
fn render_results(itinerary: &Itinerary, options: &[FlightOption]) {
    let first = itinerary.segment(0);
    let last = itinerary.segment(itinerary.len() - 1);
    let title_bar = format!(
        "================================================================================================\n  🛫  {} → {} ({} segment(s)) starting {}\n================================================================================================",
        first.origin,
        last.destination,
        itinerary.len(),
        first.depart_date
    );
    println!("{}\n", title_bar);

    let best_price = options.iter().map(|o| o.price).min().unwrap_or(0);
    println!("💰 Best Price:  ${}", best_price);
    println!("📊 Total Options: {}", options.len());

    let mut carrier_width = 7;
    for option in options.iter().take(5) {
        carrier_width = max(carrier_width, lead_carrier(option).len());
    }

    println!("\n🏆 Top {} Results:", 5.min(options.len()));
    println!("{}\n", dash_bar());
    println!(
        "  {:>3}  {:<cw$}  {:<10}  {:<10}  {:<6}   PRICE",
        "#",
        "CARRIER",
        "DURATION",
        "DISTANCE",
        "LEGS",
        cw = carrier_width
    );
    println!("{}\n", dash_bar());

    for (i, option) in options.iter().take(5).enumerate() {
        println!(
            "  {:>3}  {:<cw$}  {:<10}  {:<10}  {:<6}   {}{}",
            i + 1,
            lead_carrier(option),
            fmt_duration(option.duration_minutes),
            format!("{} mi", option.distance_miles),
            total_stops(option),
            option.currency,
            option.price,
            cw = carrier_width
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    tracing::info!("Starting wayfare-flights CLI");
    tracing::info!("Args: {:?}", args);

    let segments = args
        .segments
        .iter()
        .map(|s| parse_segment(s))
        .collect::<Result<Vec<_>>>()?;
    let itinerary = Itinerary::new(segments).context("Invalid itinerary")?;

    let flights = QpxFlightsClient::new(
        args.api_key,
        args.timeout,
        2, // queries_per_second
    )?;
    let hotels = wayfare_package_planner::ExpediaHotelsClient::new(4)?;
    let planner = PackagePlanner::new(flights, hotels, StaticAirlineDirectory);

    let options = planner
        .compute_flights(args.budget, &itinerary)
        .await
        .context("Flight search failed")?;

    tracing::info!("Search completed: {} option(s) found", options.len());
    render_results(&itinerary, &options);

    Ok(())
}
