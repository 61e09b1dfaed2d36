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

//! # Flights Query Builder
//!
//! Side-effect free construction of the flight provider's JSON request body
//! from an itinerary and a budget.

use serde::{Deserialize, Serialize};

use crate::errors::PlanError;
use crate::itinerary::Itinerary;

/// Provider cap on returned trip options per query.
pub const SOLUTION_CAP: u32 = 100;

/// Every query is priced and capped in this currency.
pub const REQUEST_CURRENCY: &str = "USD";

/// One leg descriptor of the provider request, one per itinerary segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceInput {
    pub origin: String,
    pub destination: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerCounts {
    #[serde(rename = "adultCount")]
    pub adult_count: u32,
}

/// The provider request body. Passenger count is fixed at one adult and the
/// max price carries the traveler's whole budget in the provider's
/// currency-prefixed format (`"USD2000"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchRequest {
    pub passengers: PassengerCounts,
    pub slice: Vec<SliceInput>,
    #[serde(rename = "maxPrice")]
    pub max_price: String,
    pub solutions: u32,
}

impl FlightSearchRequest {
    pub fn from_itinerary(budget: i64, itinerary: &Itinerary) -> Result<Self, PlanError> {
        if budget <= 0 {
            return Err(PlanError::validation(format!(
                "budget must be positive, got {budget}"
            )));
        }
        if itinerary.is_empty() {
            return Err(PlanError::validation("itinerary has no segments"));
        }

        let slice = itinerary
            .segments()
            .iter()
            .map(|segment| SliceInput {
                origin: segment.origin.clone(),
                destination: segment.destination.clone(),
                date: segment.depart_date.format("%Y-%m-%d").to_string(),
            })
            .collect();

        Ok(Self {
            passengers: PassengerCounts { adult_count: 1 },
            slice,
            max_price: format!("{REQUEST_CURRENCY}{budget}"),
            solutions: SOLUTION_CAP,
        })
    }
}
