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

//! Fixture-based flight response normalization tests.
//!
//! Loads captured provider JSON from `tests/fixtures-flights/` and checks the
//! normalized options: price parsing, duration/distance sums, carrier
//! resolution, and skip-and-continue on degraded entries.
//!
//! Run with:
//!     cargo test --test t_flights_parsing_fixtures

use std::path::Path;

use chrono::NaiveDate;

use wayfare_package_planner::{
    RawFlightResponse, StaticAirlineDirectory, normalize_flights,
};

fn load_fixture(name: &str) -> RawFlightResponse {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures-flights");
    let fixture_path = fixtures_dir.join(format!("{}.json", name));

    let body = std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|e| panic!("Failed to read fixture at {:?}: {}", fixture_path, e));
    serde_json::from_str(&body).expect("parse fixture")
}

#[test]
fn test_two_leg_standard_counts_and_prices() {
    let raw = load_fixture("two-leg-standard");
    let options = normalize_flights(&raw, &StaticAirlineDirectory);

    assert_eq!(options.len(), 3, "All three trip options should survive");
    assert_eq!(options[0].currency, "USD");
    assert_eq!(options[0].price, 1384);
    assert_eq!(options[1].price, 1129);
    assert_eq!(options[2].price, 1710);

    for option in &options {
        assert_eq!(option.trips.len(), 2, "Two slices means two trips");
        assert!(!option.trips[0].stops.is_empty());
    }
}

#[test]
fn test_two_leg_standard_sums_legs() {
    let raw = load_fixture("two-leg-standard");
    let options = normalize_flights(&raw, &StaticAirlineDirectory);

    // Option 2 connects through ORD: 255 + 140 + 785 minutes over three legs.
    let connecting = &options[1];
    assert_eq!(connecting.duration_minutes, 255 + 140 + 785);
    assert_eq!(connecting.distance_miles, 1846 + 740 + 6740);
    assert_eq!(connecting.trips[0].stops.len(), 2);
    assert_eq!(connecting.trips[1].stops.len(), 1);
}

#[test]
fn test_two_leg_standard_resolves_carriers() {
    let raw = load_fixture("two-leg-standard");
    let options = normalize_flights(&raw, &StaticAirlineDirectory);

    assert_eq!(options[0].trips[0].stops[0].carrier, "Delta Air Lines");
    assert_eq!(options[0].trips[1].stops[0].carrier, "All Nippon Airways");
    assert_eq!(options[0].trips[1].stops[0].flight_number, "9");
}

#[test]
fn test_two_leg_standard_arrival_dates() {
    let raw = load_fixture("two-leg-standard");
    let options = normalize_flights(&raw, &StaticAirlineDirectory);

    // Check-in for the first stop is the date the first trip lands.
    assert_eq!(
        options[0].trip_arrival_date(0),
        NaiveDate::from_ymd_opt(2026, 9, 1)
    );
    assert_eq!(
        options[0].trip_arrival_date(1),
        NaiveDate::from_ymd_opt(2026, 9, 5)
    );
    assert_eq!(options[0].trip_arrival_date(2), None);
}

#[test]
fn test_degraded_entries_skip_and_continue() {
    let raw = load_fixture("degraded-entries");
    let options = normalize_flights(&raw, &StaticAirlineDirectory);

    // Four entries in the fixture: one unknown carrier ("ZZ") and one
    // malformed sale total ("913") are dropped, the other two survive
    // in provider order.
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].price, 864);
    assert_eq!(options[0].trips[0].stops[0].carrier, "American Airlines");
    assert_eq!(options[1].price, 1040);
    assert_eq!(options[1].trips[0].stops[0].carrier, "JetBlue Airways");
}
