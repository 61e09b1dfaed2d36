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

//! # Package Assembler
//!
//! Pure combination and ranking logic: filter each segment's hotel
//! candidates, build the budget-pruned cross-product of per-segment choices
//! segment by segment, and pick the top combination under three independent
//! criteria.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;
use crate::flights_results_parser::FlightOption;
use crate::hotels_results_parser::HotelOption;

/// Hotels below this star rating are discarded when the caller sets no
/// explicit minimum.
pub const DEFAULT_STAR_MINIMUM: f64 = 3.0;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Numeric fields that take part in pruning or ranking. A hotel whose lenient
/// parse produced NaN in any of them cannot be compared and is filtered out.
fn has_finite_metrics(hotel: &HotelOption) -> bool {
    hotel.price_with_tax.is_finite()
        && hotel.star_rating.is_finite()
        && hotel.guest_rating.is_finite()
        && hotel.total_reviews.is_finite()
        && hotel.percent_recommended.is_finite()
}

/// Budget and star filter for one segment's candidates. Builds a fresh map,
/// in provider order; the input is never mutated.
pub fn filter_hotels(
    candidates: &IndexMap<String, HotelOption>,
    flight_price: i64,
    budget: i64,
    star_minimum: f64,
) -> IndexMap<String, HotelOption> {
    let mut surviving = IndexMap::new();
    for (hotel_id, hotel) in candidates {
        if !has_finite_metrics(hotel) {
            continue;
        }
        if hotel.price_with_tax + flight_price as f64 >= budget as f64 {
            continue;
        }
        if hotel.star_rating < star_minimum {
            continue;
        }
        surviving.insert(hotel_id.clone(), hotel.clone());
    }
    surviving
}

// ---------------------------------------------------------------------------
// Combination
// ---------------------------------------------------------------------------

/// A partial or complete assignment of one hotel per processed segment,
/// with running aggregate metrics.
#[derive(Debug, Clone, Default)]
pub struct PackageCandidate {
    /// One hotel per segment, in segment order.
    pub hotels_by_segment: Vec<HotelOption>,
    pub aggregate_price: f64,
    pub aggregate_star_rating: f64,
    pub aggregate_guest_rating: f64,
    pub aggregate_reviews: f64,
    pub aggregate_percent_recommended: f64,
}

impl PackageCandidate {
    fn seeded(hotel: &HotelOption) -> Self {
        Self {
            hotels_by_segment: vec![hotel.clone()],
            aggregate_price: hotel.price_with_tax,
            aggregate_star_rating: hotel.star_rating,
            aggregate_guest_rating: hotel.guest_rating,
            aggregate_reviews: hotel.total_reviews,
            aggregate_percent_recommended: hotel.percent_recommended,
        }
    }

    fn extended(&self, hotel: &HotelOption) -> Self {
        let mut hotels = Vec::with_capacity(self.hotels_by_segment.len() + 1);
        hotels.extend(self.hotels_by_segment.iter().cloned());
        hotels.push(hotel.clone());
        Self {
            hotels_by_segment: hotels,
            aggregate_price: self.aggregate_price + hotel.price_with_tax,
            aggregate_star_rating: self.aggregate_star_rating + hotel.star_rating,
            aggregate_guest_rating: self.aggregate_guest_rating + hotel.guest_rating,
            aggregate_reviews: self.aggregate_reviews + hotel.total_reviews,
            aggregate_percent_recommended: self.aggregate_percent_recommended
                + hotel.percent_recommended,
        }
    }

    pub fn segments_filled(&self) -> usize {
        self.hotels_by_segment.len()
    }
}

/// Build all per-segment hotel combinations that stay strictly under budget.
///
/// Segments are processed left to right. Any pair whose running price plus
/// the reference flight already reaches the budget is pruned before the next
/// segment is considered, which bounds working-set growth; this is not a
/// materialize-then-filter cross-product.
///
/// An empty `segments` slice (single-segment trip, nothing to book) yields
/// one empty candidate so a flight-only package can still be ranked.
pub fn combine_candidates(
    segments: &[IndexMap<String, HotelOption>],
    flight_price: i64,
    budget: i64,
) -> Vec<PackageCandidate> {
    let Some((first, rest)) = segments.split_first() else {
        return vec![PackageCandidate::default()];
    };

    let mut working: Vec<PackageCandidate> = first.values().map(PackageCandidate::seeded).collect();

    for segment in rest {
        let mut next = Vec::new();
        for candidate in &working {
            for hotel in segment.values() {
                let price = candidate.aggregate_price + hotel.price_with_tax;
                if price + flight_price as f64 >= budget as f64 {
                    continue;
                }
                next.push(candidate.extended(hotel));
            }
        }
        working = next;
        tracing::debug!(
            "Cross-product step kept {} candidates after segment {}",
            working.len(),
            segment.values().next().map_or(0, |h| h.segment_index),
        );
    }

    working
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Which of the three independent orderings produced a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankCriterion {
    /// Highest summed review count.
    MostReviewed,
    /// Highest summed guest rating.
    HighestGuestRating,
    /// Lowest price per aggregate star.
    BestValue,
}

/// One complete trip offer: the reference flight, one hotel per intermediate
/// stop in segment order, and the combined price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub criterion: RankCriterion,
    pub flight: FlightOption,
    pub hotels: Vec<HotelOption>,
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSet {
    pub packages: [Package; 3],
}

/// Pick the single best candidate under `key`. Strict comparison keeps the
/// first-seen candidate on ties, so rankings are deterministic for identical
/// provider responses.
fn top_candidate<'a>(
    candidates: &'a [PackageCandidate],
    key: impl Fn(&PackageCandidate) -> f64,
    descending: bool,
) -> &'a PackageCandidate {
    let mut best = &candidates[0];
    for candidate in &candidates[1..] {
        let better = if descending {
            key(candidate) > key(best)
        } else {
            key(candidate) < key(best)
        };
        if better {
            best = candidate;
        }
    }
    best
}

/// Rank the complete candidates and pair each winner with the reference
/// flight. Fails with `NoPackage` when nothing survived pruning.
pub fn assemble_packages(
    flight: &FlightOption,
    candidates: &[PackageCandidate],
) -> Result<PackageSet, PlanError> {
    if candidates.is_empty() {
        return Err(PlanError::NoPackage);
    }

    let most_reviewed = top_candidate(candidates, |c| c.aggregate_reviews, true);
    let highest_rated = top_candidate(candidates, |c| c.aggregate_guest_rating, true);
    let best_value = top_candidate(
        candidates,
        |c| c.aggregate_price / c.aggregate_star_rating,
        false,
    );

    let to_package = |criterion: RankCriterion, candidate: &PackageCandidate| Package {
        criterion,
        flight: flight.clone(),
        hotels: candidate.hotels_by_segment.clone(),
        total_price: flight.price as f64 + candidate.aggregate_price,
    };

    Ok(PackageSet {
        packages: [
            to_package(RankCriterion::MostReviewed, most_reviewed),
            to_package(RankCriterion::HighestGuestRating, highest_rated),
            to_package(RankCriterion::BestValue, best_value),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hotel(id: &str, price: f64, star: f64, segment_index: usize) -> HotelOption {
        HotelOption {
            hotel_id: id.to_string(),
            name: format!("Hotel {id}"),
            address: String::new(),
            city: String::new(),
            checkout_date: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            star_rating: star,
            guest_rating: 4.0,
            total_reviews: 100.0,
            percent_recommended: 90.0,
            total_recommendations: 80.0,
            price_with_tax: price,
            segment_index,
        }
    }

    fn segment_map(hotels: Vec<HotelOption>) -> IndexMap<String, HotelOption> {
        hotels.into_iter().map(|h| (h.hotel_id.clone(), h)).collect()
    }

    fn flight(price: i64) -> FlightOption {
        FlightOption {
            currency: "USD".into(),
            price,
            duration_minutes: 600,
            distance_miles: 5000,
            trips: Vec::new(),
        }
    }

    #[test]
    fn filter_rejects_over_budget_low_star_and_nan() {
        let mut nan_price = hotel("nan", f64::NAN, 4.0, 0);
        nan_price.price_with_tax = f64::NAN;
        let mut nan_star = hotel("nan-star", 100.0, 4.0, 0);
        nan_star.star_rating = f64::NAN;

        let candidates = segment_map(vec![
            hotel("ok", 300.0, 4.0, 0),
            hotel("pricey", 1500.0, 5.0, 0), // 1500 + 800 >= 2000
            hotel("dingy", 100.0, 2.0, 0),
            nan_price,
            nan_star,
        ]);
        let surviving = filter_hotels(&candidates, 800, 2000, 3.0);
        let ids: Vec<&str> = surviving.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn filter_budget_threshold_is_strict() {
        // 1200 + 800 == 2000 must be rejected, 1199 + 800 kept.
        let candidates = segment_map(vec![
            hotel("edge", 1200.0, 4.0, 0),
            hotel("under", 1199.0, 4.0, 0),
        ]);
        let surviving = filter_hotels(&candidates, 800, 2000, 3.0);
        assert!(!surviving.contains_key("edge"));
        assert!(surviving.contains_key("under"));
    }

    #[test]
    fn combine_prunes_before_advancing() {
        // Budget 2000, flight 800.
        // Segment A: H1 (300, 4*), H2 (1000, 5*); segment B: H3 (200, 3*).
        let segment_a = segment_map(vec![hotel("H1", 300.0, 4.0, 0), hotel("H2", 1000.0, 5.0, 0)]);
        let segment_b = segment_map(vec![hotel("H3", 200.0, 3.0, 1)]);

        let complete = combine_candidates(&[segment_a, segment_b], 800, 2000);

        // (H2,H3) totals 800+1000+200 = 2000 and is pruned; (H1,H3) survives.
        assert_eq!(complete.len(), 1);
        let only = &complete[0];
        assert_eq!(only.segments_filled(), 2);
        assert_eq!(only.hotels_by_segment[0].hotel_id, "H1");
        assert_eq!(only.hotels_by_segment[1].hotel_id, "H3");
        assert_eq!(only.aggregate_price, 500.0);
    }

    #[test]
    fn combine_accumulates_aggregates() {
        let mut h1 = hotel("H1", 300.0, 4.0, 0);
        h1.guest_rating = 4.5;
        h1.total_reviews = 200.0;
        let mut h3 = hotel("H3", 200.0, 3.0, 1);
        h3.guest_rating = 3.9;
        h3.total_reviews = 50.0;

        let complete = combine_candidates(
            &[segment_map(vec![h1]), segment_map(vec![h3])],
            800,
            5000,
        );
        assert_eq!(complete.len(), 1);
        let candidate = &complete[0];
        assert_eq!(candidate.aggregate_star_rating, 7.0);
        assert_eq!(candidate.aggregate_guest_rating, 8.4);
        assert_eq!(candidate.aggregate_reviews, 250.0);
    }

    #[test]
    fn combine_with_no_intermediate_stops_yields_flight_only_candidate() {
        let complete = combine_candidates(&[], 800, 2000);
        assert_eq!(complete.len(), 1);
        assert_eq!(complete[0].segments_filled(), 0);
        assert_eq!(complete[0].aggregate_price, 0.0);
    }

    #[test]
    fn assemble_fails_with_no_package_on_empty_set() {
        let result = assemble_packages(&flight(800), &[]);
        assert!(matches!(result, Err(PlanError::NoPackage)));
    }

    #[test]
    fn assemble_ranks_three_independent_criteria() {
        let mut reviewed = hotel("reviewed", 400.0, 4.0, 0);
        reviewed.total_reviews = 5000.0;
        reviewed.guest_rating = 3.8;

        let mut rated = hotel("rated", 500.0, 4.0, 0);
        rated.total_reviews = 120.0;
        rated.guest_rating = 4.9;

        let mut cheap = hotel("cheap", 150.0, 5.0, 0);
        cheap.total_reviews = 80.0;
        cheap.guest_rating = 4.1;

        let candidates =
            combine_candidates(&[segment_map(vec![reviewed, rated, cheap])], 800, 5000);
        let set = assemble_packages(&flight(800), &candidates).unwrap();

        assert_eq!(set.packages[0].criterion, RankCriterion::MostReviewed);
        assert_eq!(set.packages[0].hotels[0].hotel_id, "reviewed");
        assert_eq!(set.packages[1].criterion, RankCriterion::HighestGuestRating);
        assert_eq!(set.packages[1].hotels[0].hotel_id, "rated");
        assert_eq!(set.packages[2].criterion, RankCriterion::BestValue);
        assert_eq!(set.packages[2].hotels[0].hotel_id, "cheap");

        // Budget invariant carries into the emitted totals.
        assert_eq!(set.packages[0].total_price, 1200.0);
    }

    #[test]
    fn ranking_ties_break_to_first_seen() {
        let a = hotel("first", 300.0, 4.0, 0);
        let b = hotel("second", 300.0, 4.0, 0);
        let candidates = combine_candidates(&[segment_map(vec![a, b])], 800, 5000);
        let set = assemble_packages(&flight(800), &candidates).unwrap();
        for package in &set.packages {
            assert_eq!(package.hotels[0].hotel_id, "first");
        }
    }
}
