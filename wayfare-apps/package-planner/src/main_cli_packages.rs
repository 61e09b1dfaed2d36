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

//! CLI for budget trip-package planning.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use term_size;
use wayfare_package_planner::{
    ExpediaHotelsClient, Itinerary, Package, PackagePlanner, QpxFlightsClient, RankCriterion,
    Segment, StaticAirlineDirectory,
};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "wayfare-packages")]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Total trip budget in whole USD (flight plus all hotels)
    #[arg(short, long)]
    budget: i64,

    /// Minimum hotel star rating (defaults to 3)
    #[arg(long)]
    star: Option<f64>,

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

fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(100)
}

fn dash_bar() -> String {
    "-".repeat(get_terminal_width().min(100))
}

fn criterion_label(criterion: RankCriterion) -> &'static str {
    match criterion {
        RankCriterion::MostReviewed => "Most reviewed",
        RankCriterion::HighestGuestRating => "Highest guest rating",
        RankCriterion::BestValue => "Best price per star",
    }
}

fn render_package(index: usize, package: &Package) {
    println!("📦 Package {}: {}", index + 1, criterion_label(package.criterion));
    println!(
        "   ✈️  {}{} · {} min · {} mi",
        package.flight.currency,
        package.flight.price,
        package.flight.duration_minutes,
        package.flight.distance_miles
    );
    for hotel in &package.hotels {
        println!(
            "   🏨 segment {}: {} ({}, {:.1}★, guest {:.1}, {} reviews) · ${:.0} until {}",
            hotel.segment_index,
            hotel.name,
            hotel.city,
            hotel.star_rating,
            hotel.guest_rating,
            hotel.total_reviews,
            hotel.price_with_tax,
            hotel.checkout_date
        );
    }
    println!("   💰 Total: ${:.0}", package.total_price);
    println!("{}", dash_bar());
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    tracing::info!("Starting wayfare-packages CLI");
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
    let hotels = ExpediaHotelsClient::new(4)?;
    let planner = PackagePlanner::new(flights, hotels, StaticAirlineDirectory);

    let set = planner
        .compute_packages(args.budget, args.star, &itinerary)
        .await
        .context("Package planning failed")?;

    println!("{}", dash_bar());
    for (i, package) in set.packages.iter().enumerate() {
        render_package(i, package);
    }

    Ok(())
}
