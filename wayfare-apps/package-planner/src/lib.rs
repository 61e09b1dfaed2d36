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

// Library for the Wayfare package planner:
// multi-leg flight offers plus per-stop hotels assembled into ranked trip
// packages under a traveler budget.

mod airlines;
mod assembler;
mod errors;
mod flights_query_builder;
mod flights_results_parser;
mod flights_search;
mod hotels_query_builder;
mod hotels_results_parser;
mod hotels_search;
mod itinerary;
mod planner;
mod providers;

pub use airlines::StaticAirlineDirectory;
pub use assembler::{
    DEFAULT_STAR_MINIMUM, Package, PackageCandidate, PackageSet, RankCriterion,
    assemble_packages, combine_candidates, filter_hotels,
};
pub use errors::PlanError;
pub use flights_query_builder::{FlightSearchRequest, PassengerCounts, SliceInput, SOLUTION_CAP};
pub use flights_results_parser::{
    FlightOption, RawFlightResponse, RawTripOption, Stop, Trip, normalize_flights,
};
pub use flights_search::QpxFlightsClient;
pub use hotels_query_builder::{HotelSearchRequest, RESULTS_PER_PAGE, ROOM_GUESTS};
pub use hotels_results_parser::{HotelOption, RawHotelResponse, normalize_hotels};
pub use hotels_search::ExpediaHotelsClient;
pub use itinerary::{Itinerary, MAX_SEGMENTS, Segment};
pub use planner::{FlightCandidates, PackagePlanner, select_flight_candidates};
pub use providers::{AirlineDirectory, FlightProvider, HotelProvider};
