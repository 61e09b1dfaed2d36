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

//! # Provider collaborator interfaces
//!
//! The planner core talks to the outside world only through these traits.
//! HTTP implementations live in `flights_search` and `hotels_search`; tests
//! substitute in-memory fakes.

use std::future::Future;

use anyhow::Result;

use crate::flights_query_builder::FlightSearchRequest;
use crate::flights_results_parser::RawFlightResponse;
use crate::hotels_query_builder::HotelSearchRequest;
use crate::hotels_results_parser::RawHotelResponse;

/// Asynchronous flight-search collaborator. May reject with a transport or
/// provider error; the planner treats that as terminal.
pub trait FlightProvider: Send + Sync {
    fn search(
        &self,
        request: &FlightSearchRequest,
    ) -> impl Future<Output = Result<RawFlightResponse>> + Send;
}

/// Asynchronous hotel-search collaborator, same failure contract as
/// [`FlightProvider`].
pub trait HotelProvider: Send + Sync {
    fn search(
        &self,
        request: &HotelSearchRequest,
    ) -> impl Future<Output = Result<RawHotelResponse>> + Send;
}

/// Synchronous, pure airline-name lookup. An absent code is a lookup miss,
/// not an error.
pub trait AirlineDirectory: Send + Sync {
    fn lookup(&self, iata_code: &str) -> Option<&str>;
}
