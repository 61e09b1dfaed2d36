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

//! # Flights Results Parser
//!
//! Side-effect free normalization of the raw flight provider response into
//! ranked-ready [`FlightOption`]s. Output order is provider order; no rank is
//! implied here.

use serde::{Deserialize, Serialize};

use crate::errors::PlanError;
use crate::providers::AirlineDirectory;

// ---------------------------------------------------------------------------
// Raw provider wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFlightResponse {
    #[serde(default)]
    pub trips: RawTrips,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTrips {
    #[serde(default, rename = "tripOption")]
    pub trip_option: Vec<RawTripOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTripOption {
    /// Combined currency and amount, e.g. `"USD1384"`.
    #[serde(rename = "saleTotal")]
    pub sale_total: String,
    #[serde(default)]
    pub slice: Vec<RawSlice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSlice {
    #[serde(default)]
    pub segment: Vec<RawSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSegment {
    pub flight: RawFlightDesignator,
    #[serde(default)]
    pub leg: Vec<RawLeg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFlightDesignator {
    pub carrier: String,
    pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLeg {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(rename = "departureTime")]
    pub departure_time: String,
    #[serde(rename = "arrivalTime")]
    pub arrival_time: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub mileage: i64,
}

// ---------------------------------------------------------------------------
// Normalized domain types
// ---------------------------------------------------------------------------

/// One physical flight within a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub carrier: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration_minutes: i64,
    pub distance_miles: i64,
}

/// The flown counterpart of one itinerary segment: an ordered sequence of
/// stops (at least one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub stops: Vec<Stop>,
}

/// One priced way of flying the whole itinerary. Duration and distance are
/// summed over every leg of every trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    pub currency: String,
    pub price: i64,
    pub duration_minutes: i64,
    pub distance_miles: i64,
    pub trips: Vec<Trip>,
}

impl FlightOption {
    /// Arrival date (date portion of the timestamp) of the last stop of the
    /// trip at `trip_index`. This is the hotel check-in date for that stop.
    pub fn trip_arrival_date(&self, trip_index: usize) -> Option<chrono::NaiveDate> {
        let stop = self.trips.get(trip_index)?.stops.last()?;
        let date_part = stop.arrival_time.get(0..10)?;
        chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Split a provider money string into currency code (first three characters)
/// and integer amount (the remainder).
fn parse_sale_total(sale_total: &str) -> Option<(String, i64)> {
    if !sale_total.is_char_boundary(3) || sale_total.len() < 4 {
        return None;
    }
    let (currency, amount) = sale_total.split_at(3);
    let amount: i64 = amount.parse().ok()?;
    Some((currency.to_string(), amount))
}

fn normalize_option(
    raw: &RawTripOption,
    directory: &impl AirlineDirectory,
) -> Result<FlightOption, PlanError> {
    let (currency, price) = parse_sale_total(&raw.sale_total).ok_or_else(|| {
        PlanError::validation(format!("unparseable sale total: {:?}", raw.sale_total))
    })?;

    let mut duration_minutes = 0;
    let mut distance_miles = 0;
    let mut trips = Vec::with_capacity(raw.slice.len());

    for slice in &raw.slice {
        let mut stops = Vec::new();
        for segment in &slice.segment {
            let carrier_name = directory
                .lookup(&segment.flight.carrier)
                .ok_or_else(|| PlanError::Lookup {
                    code: segment.flight.carrier.clone(),
                })?
                .to_string();

            for leg in &segment.leg {
                duration_minutes += leg.duration;
                distance_miles += leg.mileage;
                stops.push(Stop {
                    carrier: carrier_name.clone(),
                    flight_number: segment.flight.number.clone(),
                    origin: leg.origin.clone(),
                    destination: leg.destination.clone(),
                    departure_time: leg.departure_time.clone(),
                    arrival_time: leg.arrival_time.clone(),
                    duration_minutes: leg.duration,
                    distance_miles: leg.mileage,
                });
            }
        }
        trips.push(Trip { stops });
    }

    Ok(FlightOption {
        currency,
        price,
        duration_minutes,
        distance_miles,
        trips,
    })
}

/// Normalize the provider response. Items with an unresolvable carrier code
/// or an unparseable price are skipped with a warning; the batch continues.
pub fn normalize_flights(
    raw: &RawFlightResponse,
    directory: &impl AirlineDirectory,
) -> Vec<FlightOption> {
    let mut options = Vec::with_capacity(raw.trips.trip_option.len());
    for (index, raw_option) in raw.trips.trip_option.iter().enumerate() {
        match normalize_option(raw_option, directory) {
            Ok(option) => options.push(option),
            Err(e) => {
                tracing::warn!("Skipping trip option {}: {}", index, e);
            }
        }
    }
    options
}
