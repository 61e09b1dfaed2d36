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

//! # Segment Orchestrator
//!
//! Drives one flight query and one concurrent hotel query per intermediate
//! stop, joins when every hotel query has settled, and hands the per-segment
//! candidate sets to the assembler.

use anyhow::anyhow;
use futures_util::future::try_join_all;
use indexmap::IndexMap;

use crate::assembler::{
    DEFAULT_STAR_MINIMUM, assemble_packages, combine_candidates, filter_hotels, PackageSet,
};
use crate::errors::PlanError;
use crate::flights_query_builder::FlightSearchRequest;
use crate::flights_results_parser::{FlightOption, normalize_flights};
use crate::hotels_query_builder::HotelSearchRequest;
use crate::hotels_results_parser::{HotelOption, normalize_hotels};
use crate::itinerary::Itinerary;
use crate::providers::{AirlineDirectory, FlightProvider, HotelProvider};

/// The three flight candidates carried into package assembly. Budget math
/// always references `lowest_price`.
#[derive(Debug, Clone)]
pub struct FlightCandidates {
    pub lowest_price: FlightOption,
    pub lowest_duration: FlightOption,
    pub lowest_distance: FlightOption,
}

/// Three reductions in one traversal; ties keep the first-seen option so the
/// selection is deterministic for identical provider responses.
pub fn select_flight_candidates(options: &[FlightOption]) -> Option<FlightCandidates> {
    let mut by_price = options.first()?;
    let mut by_duration = by_price;
    let mut by_distance = by_price;

    for option in &options[1..] {
        if option.price < by_price.price {
            by_price = option;
        }
        if option.duration_minutes < by_duration.duration_minutes {
            by_duration = option;
        }
        if option.distance_miles < by_distance.distance_miles {
            by_distance = option;
        }
    }

    Some(FlightCandidates {
        lowest_price: by_price.clone(),
        lowest_duration: by_duration.clone(),
        lowest_distance: by_distance.clone(),
    })
}

/// Request-scoped planning over abstract providers. Holds no mutable state;
/// concurrent requests share nothing.
#[derive(Clone)]
pub struct PackagePlanner<F, H, D> {
    flights: F,
    hotels: H,
    airlines: D,
}

impl<F, H, D> PackagePlanner<F, H, D>
where
    F: FlightProvider,
    H: HotelProvider,
    D: AirlineDirectory,
{
    pub fn new(flights: F, hotels: H, airlines: D) -> Self {
        Self {
            flights,
            hotels,
            airlines,
        }
    }

    /// Flight query and normalization only: one slice per segment, provider
    /// order preserved.
    pub async fn compute_flights(
        &self,
        budget: i64,
        itinerary: &Itinerary,
    ) -> Result<Vec<FlightOption>, PlanError> {
        let request = FlightSearchRequest::from_itinerary(budget, itinerary)?;
        tracing::info!(
            "Flight query: {} segment(s), max price {}",
            request.slice.len(),
            request.max_price
        );
        let raw = self
            .flights
            .search(&request)
            .await
            .map_err(PlanError::Provider)?;
        let options = normalize_flights(&raw, &self.airlines);
        tracing::info!("Finished flight query: {} option(s)", options.len());
        Ok(options)
    }

    /// Full package planning: flights, concurrent per-stop hotel queries,
    /// budget-pruned combination, three ranked packages.
    pub async fn compute_packages(
        &self,
        budget: i64,
        star_minimum: Option<f64>,
        itinerary: &Itinerary,
    ) -> Result<PackageSet, PlanError> {
        let star_minimum = star_minimum.unwrap_or(DEFAULT_STAR_MINIMUM);

        let options = self.compute_flights(budget, itinerary).await?;
        let candidates = select_flight_candidates(&options).ok_or_else(|| {
            PlanError::Provider(anyhow!("flight provider returned no usable trip options"))
        })?;
        let reference = &candidates.lowest_price;

        // One hotel query per intermediate stop, all dispatched in the same
        // tick, in segment order. try_join_all resolves in that order once
        // every query settles, or short-circuits on the first failure;
        // results of still-pending siblings are then discarded (no provider
        // cancellation is sent).
        let mut queries = Vec::with_capacity(itinerary.stop_count());
        for stop in 0..itinerary.stop_count() {
            let city = &itinerary.segment(stop).destination;
            let checkin = reference.trip_arrival_date(stop).ok_or_else(|| {
                PlanError::Provider(anyhow!(
                    "flight option carries no parseable arrival time for segment {stop}"
                ))
            })?;
            let checkout = itinerary.segment(stop + 1).depart_date;
            let request = HotelSearchRequest::new(
                city,
                &checkin.format("%Y-%m-%d").to_string(),
                &checkout.format("%Y-%m-%d").to_string(),
            )?;
            tracing::info!(
                "Hotel query for segment {}: {} {} → {}",
                stop,
                city,
                request.checkin_date,
                request.checkout_date
            );
            queries.push(self.fetch_segment_hotels(
                request,
                stop,
                reference.price,
                budget,
                star_minimum,
            ));
        }
        let per_segment: Vec<IndexMap<String, HotelOption>> = try_join_all(queries).await?;
        tracing::info!("Finished hotel queries for {} segment(s)", per_segment.len());

        let complete = combine_candidates(&per_segment, reference.price, budget);
        assemble_packages(reference, &complete)
    }

    async fn fetch_segment_hotels(
        &self,
        request: HotelSearchRequest,
        segment_index: usize,
        flight_price: i64,
        budget: i64,
        star_minimum: f64,
    ) -> Result<IndexMap<String, HotelOption>, PlanError> {
        let raw = self
            .hotels
            .search(&request)
            .await
            .map_err(PlanError::Provider)?;
        let candidates = normalize_hotels(&raw, request.checkout(), segment_index);
        let surviving = filter_hotels(&candidates, flight_price, budget, star_minimum);
        tracing::debug!(
            "Segment {}: {} hotel(s) normalized, {} after filters",
            segment_index,
            candidates.len(),
            surviving.len()
        );
        if surviving.is_empty() {
            return Err(PlanError::NoOptions {
                segment: segment_index,
            });
        }
        Ok(surviving)
    }
}
