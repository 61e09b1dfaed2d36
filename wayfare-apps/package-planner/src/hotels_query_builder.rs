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

//! # Hotels Query Builder
//!
//! Side-effect free construction of the hotel provider request from a
//! destination city and a date range. Room configuration is fixed: one room,
//! two guests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

/// Guests in the single requested room.
pub const ROOM_GUESTS: u32 = 2;

/// Provider cap on returned hotels per query.
pub const RESULTS_PER_PAGE: u32 = 200;

const SEARCH_ENDPOINT: &str = "https://www.expedia.com/m/api/hotel/search/v3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSearchRequest {
    pub city: String,
    pub checkin_date: String,
    pub checkout_date: String,
    pub room_guests: u32,
    pub results_per_page: u32,
    pub filter_unavailable: bool,
}

impl HotelSearchRequest {
    pub fn new(city: &str, checkin_date: &str, checkout_date: &str) -> Result<Self, PlanError> {
        if city.trim().is_empty() {
            return Err(PlanError::validation("destination city is empty"));
        }
        parse_iso_date(checkin_date, "checkin date")?;
        parse_iso_date(checkout_date, "checkout date")?;

        Ok(Self {
            city: city.to_string(),
            checkin_date: checkin_date.to_string(),
            checkout_date: checkout_date.to_string(),
            room_guests: ROOM_GUESTS,
            results_per_page: RESULTS_PER_PAGE,
            filter_unavailable: true,
        })
    }

    pub fn checkout(&self) -> NaiveDate {
        // Validated in new(), reparse cannot fail.
        NaiveDate::parse_from_str(&self.checkout_date, "%Y-%m-%d").unwrap_or_default()
    }

    /// Full provider URL, unavailable inventory excluded, prices with fees.
    pub fn search_url(&self) -> String {
        format!(
            "{}?city={}&checkInDate={}&checkOutDate={}&room1={}\
             &enableSponsoredListings=false&enableTravelAdsList=false\
             &filterUnavailable={}&priceType=DEFAULT_POS_PRICE_TYPE_WITH_FEES\
             &resultsPerPage={}&returnOpaqueHotels=false&sendAdaptedResponse=false\
             &shopWithPoints=false",
            SEARCH_ENDPOINT,
            urlencoding::encode(&self.city),
            self.checkin_date,
            self.checkout_date,
            self.room_guests,
            self.filter_unavailable,
            self.results_per_page,
        )
    }
}

fn parse_iso_date(s: &str, what: &str) -> Result<NaiveDate, PlanError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| PlanError::validation(format!("{what} is not an ISO date: {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_fixed_room_configuration() {
        let request = HotelSearchRequest::new("Tokyo", "2026-09-01", "2026-09-05").unwrap();
        assert_eq!(request.room_guests, 2);
        assert_eq!(request.results_per_page, 200);
        assert!(request.filter_unavailable);
        assert_eq!(request.checkout(), NaiveDate::from_ymd_opt(2026, 9, 5).unwrap());
    }

    #[test]
    fn rejects_empty_city_and_bad_dates() {
        assert!(matches!(
            HotelSearchRequest::new("  ", "2026-09-01", "2026-09-05"),
            Err(PlanError::Validation(_))
        ));
        assert!(matches!(
            HotelSearchRequest::new("Tokyo", "09/01/2026", "2026-09-05"),
            Err(PlanError::Validation(_))
        ));
        assert!(matches!(
            HotelSearchRequest::new("Tokyo", "2026-09-01", "tomorrow"),
            Err(PlanError::Validation(_))
        ));
    }

    #[test]
    fn search_url_encodes_city_and_carries_caps() {
        let request = HotelSearchRequest::new("San Jose", "2026-09-01", "2026-09-05").unwrap();
        let url = request.search_url();
        assert!(url.contains("city=San%20Jose"));
        assert!(url.contains("room1=2"));
        assert!(url.contains("resultsPerPage=200"));
        assert!(url.contains("filterUnavailable=true"));
        assert!(url.contains("checkInDate=2026-09-01"));
    }
}
