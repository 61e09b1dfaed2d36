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

//! End-to-end assembly tests over the pure pipeline: filter each segment,
//! build the pruned cross-product, rank. No providers involved.
//!
//! Run with:
//!     cargo test --test t_packages_assembly

use chrono::NaiveDate;
use indexmap::IndexMap;

use wayfare_package_planner::{
    FlightOption, HotelOption, RankCriterion, assemble_packages, combine_candidates, filter_hotels,
};

fn hotel(id: &str, price: f64, star: f64, guest: f64, reviews: f64, segment: usize) -> HotelOption {
    HotelOption {
        hotel_id: id.to_string(),
        name: format!("Hotel {id}"),
        address: "1 Test Street".to_string(),
        city: "Testville".to_string(),
        checkout_date: NaiveDate::from_ymd_opt(2026, 9, 8).unwrap(),
        star_rating: star,
        guest_rating: guest,
        total_reviews: reviews,
        percent_recommended: 90.0,
        total_recommendations: reviews * 0.8,
        price_with_tax: price,
        segment_index: segment,
    }
}

fn segment_map(hotels: Vec<HotelOption>) -> IndexMap<String, HotelOption> {
    hotels.into_iter().map(|h| (h.hotel_id.clone(), h)).collect()
}

fn flight(price: i64) -> FlightOption {
    FlightOption {
        currency: "USD".to_string(),
        price,
        duration_minutes: 740,
        distance_miles: 6200,
        trips: Vec::new(),
    }
}

/// Filter then combine, the way the planner drives the pipeline.
fn filtered_segments(
    raw_segments: Vec<IndexMap<String, HotelOption>>,
    flight_price: i64,
    budget: i64,
    star_minimum: f64,
) -> Vec<IndexMap<String, HotelOption>> {
    raw_segments
        .iter()
        .map(|segment| filter_hotels(segment, flight_price, budget, star_minimum))
        .collect()
}

#[test]
fn test_pruning_drops_pairs_at_budget() {
    // Budget 2000, flight 800. Pair (h2, h3) totals exactly 2000 with the
    // flight and must be pruned; (h1, h3) stays strictly under.
    let segments = filtered_segments(
        vec![
            segment_map(vec![
                hotel("h1", 300.0, 4.0, 4.2, 500.0, 0),
                hotel("h2", 500.0, 3.0, 4.0, 300.0, 0),
            ]),
            segment_map(vec![hotel("h3", 700.0, 5.0, 4.7, 900.0, 1)]),
        ],
        800,
        2000,
        3.0,
    );
    let candidates = combine_candidates(&segments, 800, 2000);

    assert_eq!(candidates.len(), 1);
    let ids: Vec<&str> = candidates[0]
        .hotels_by_segment
        .iter()
        .map(|h| h.hotel_id.as_str())
        .collect();
    assert_eq!(ids, vec!["h1", "h3"]);
    assert_eq!(candidates[0].aggregate_price, 1000.0);
}

#[test]
fn test_every_package_stays_under_budget() {
    let budget = 2500;
    let flight_price = 900;
    let segments = filtered_segments(
        vec![
            segment_map(vec![
                hotel("a1", 200.0, 3.0, 3.9, 150.0, 0),
                hotel("a2", 450.0, 4.0, 4.4, 800.0, 0),
                hotel("a3", 900.0, 5.0, 4.8, 2100.0, 0),
            ]),
            segment_map(vec![
                hotel("b1", 180.0, 3.0, 4.0, 300.0, 1),
                hotel("b2", 520.0, 4.5, 4.6, 1200.0, 1),
                hotel("b3", 1400.0, 5.0, 4.9, 3000.0, 1),
            ]),
        ],
        flight_price,
        budget,
        3.0,
    );
    let candidates = combine_candidates(&segments, flight_price, budget);
    assert!(!candidates.is_empty());
    for candidate in &candidates {
        assert!(
            candidate.aggregate_price + (flight_price as f64) < budget as f64,
            "Candidate at {} breaks the budget",
            candidate.aggregate_price
        );
    }

    let set = assemble_packages(&flight(flight_price), &candidates).expect("rank candidates");
    for package in &set.packages {
        assert!(package.total_price < budget as f64);
        assert_eq!(package.hotels.len(), 2);
        assert_eq!(package.hotels[0].segment_index, 0);
        assert_eq!(package.hotels[1].segment_index, 1);
    }
}

#[test]
fn test_star_minimum_is_honored() {
    let raw = segment_map(vec![
        hotel("threehalf", 200.0, 3.5, 4.0, 100.0, 0),
        hotel("four", 250.0, 4.0, 4.1, 200.0, 0),
    ]);
    let surviving = filter_hotels(&raw, 500, 5000, 4.0);
    let ids: Vec<&str> = surviving.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["four"]);
}

#[test]
fn test_rankings_pick_independent_winners() {
    // One segment, three hotels, each the winner of a different criterion:
    //   crowd:  most reviews
    //   loved:  best guest rating
    //   thrift: lowest price per star
    let segments = vec![segment_map(vec![
        hotel("crowd", 400.0, 4.0, 4.2, 5000.0, 0),
        hotel("loved", 420.0, 4.0, 4.9, 900.0, 0),
        hotel("thrift", 150.0, 3.0, 4.0, 700.0, 0),
    ])];
    let candidates = combine_candidates(&segments, 500, 5000);
    let set = assemble_packages(&flight(500), &candidates).expect("rank candidates");

    assert_eq!(set.packages[0].criterion, RankCriterion::MostReviewed);
    assert_eq!(set.packages[0].hotels[0].hotel_id, "crowd");
    assert_eq!(set.packages[1].criterion, RankCriterion::HighestGuestRating);
    assert_eq!(set.packages[1].hotels[0].hotel_id, "loved");
    assert_eq!(set.packages[2].criterion, RankCriterion::BestValue);
    assert_eq!(set.packages[2].hotels[0].hotel_id, "thrift");
    assert_eq!(set.packages[2].total_price, 650.0);
}

#[test]
fn test_ties_keep_first_seen() {
    // Identical metrics across the board; provider order decides.
    let segments = vec![segment_map(vec![
        hotel("first", 300.0, 4.0, 4.5, 1000.0, 0),
        hotel("second", 300.0, 4.0, 4.5, 1000.0, 0),
    ])];
    let candidates = combine_candidates(&segments, 500, 5000);
    let set = assemble_packages(&flight(500), &candidates).expect("rank candidates");

    for package in &set.packages {
        assert_eq!(package.hotels[0].hotel_id, "first");
    }
}

#[test]
fn test_determinism_across_runs() {
    let build = || {
        let segments = filtered_segments(
            vec![
                segment_map(vec![
                    hotel("a1", 200.0, 3.0, 3.9, 150.0, 0),
                    hotel("a2", 450.0, 4.0, 4.4, 800.0, 0),
                ]),
                segment_map(vec![
                    hotel("b1", 180.0, 3.0, 4.0, 300.0, 1),
                    hotel("b2", 520.0, 4.5, 4.6, 1200.0, 1),
                ]),
            ],
            900,
            2500,
            3.0,
        );
        let candidates = combine_candidates(&segments, 900, 2500);
        assemble_packages(&flight(900), &candidates).expect("rank candidates")
    };

    let first = build();
    let second = build();
    for (a, b) in first.packages.iter().zip(second.packages.iter()) {
        assert_eq!(a.criterion, b.criterion);
        assert_eq!(a.total_price, b.total_price);
        let ids_a: Vec<&str> = a.hotels.iter().map(|h| h.hotel_id.as_str()).collect();
        let ids_b: Vec<&str> = b.hotels.iter().map(|h| h.hotel_id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }
}

#[test]
fn test_single_segment_trip_yields_flight_only_packages() {
    // No intermediate stop means no hotels to book; the ranked packages are
    // the flight alone.
    let candidates = combine_candidates(&[], 1200, 2000);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].segments_filled(), 0);

    let set = assemble_packages(&flight(1200), &candidates).expect("rank candidates");
    for package in &set.packages {
        assert!(package.hotels.is_empty());
        assert_eq!(package.total_price, 1200.0);
    }
}
