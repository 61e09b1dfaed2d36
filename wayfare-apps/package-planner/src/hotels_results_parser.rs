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

//! # Hotels Results Parser
//!
//! Side-effect free normalization of the raw hotel provider response into a
//! hotel-id keyed map, preserving provider order. Numeric fields parse
//! leniently: absent or non-numeric values become NaN, which the assembler
//! filter treats as "discard this hotel", never as a fatal error.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Raw provider wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHotelResponse {
    #[serde(default, rename = "hotelList")]
    pub hotel_list: Vec<RawHotel>,
}

/// The provider is loose with types (numbers arrive as numbers or strings,
/// fields go missing), so everything non-structural is an optional `Value`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHotel {
    #[serde(default, rename = "hotelId")]
    pub hotel_id: Option<Value>,
    #[serde(default, rename = "localizedName")]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, rename = "totalReviews")]
    pub total_reviews: Option<Value>,
    #[serde(default, rename = "hotelGuestRating")]
    pub hotel_guest_rating: Option<Value>,
    #[serde(default, rename = "hotelStarRating")]
    pub hotel_star_rating: Option<Value>,
    #[serde(default, rename = "percentRecommended")]
    pub percent_recommended: Option<Value>,
    #[serde(default, rename = "totalRecommendations")]
    pub total_recommendations: Option<Value>,
    #[serde(default, rename = "lowRateInfo")]
    pub low_rate_info: Option<RawLowRateInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLowRateInfo {
    #[serde(default)]
    pub total: Option<Value>,
}

// ---------------------------------------------------------------------------
// Normalized domain type
// ---------------------------------------------------------------------------

/// One bookable hotel for one itinerary gap. Created once per provider
/// response item and never mutated afterwards; assembly only references and
/// copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOption {
    pub hotel_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub checkout_date: NaiveDate,
    pub star_rating: f64,
    pub guest_rating: f64,
    pub total_reviews: f64,
    pub percent_recommended: f64,
    pub total_recommendations: f64,
    pub price_with_tax: f64,
    /// Which itinerary gap this hotel fills.
    pub segment_index: usize,
}

// ---------------------------------------------------------------------------
// Lenient field extraction
// ---------------------------------------------------------------------------

fn lenient_f64(value: &Option<Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn lenient_id(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_address(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        // The provider nests street addresses one level down.
        Some(Value::Object(fields)) => fields
            .get("firstAddressLine")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize the provider response into an id-keyed map in provider order,
/// attaching `checkout_date` and `segment_index` to every entry (the
/// response does not carry them per item). Entries without a usable hotel id
/// are dropped.
pub fn normalize_hotels(
    raw: &RawHotelResponse,
    checkout_date: NaiveDate,
    segment_index: usize,
) -> IndexMap<String, HotelOption> {
    let mut hotels = IndexMap::with_capacity(raw.hotel_list.len());

    for item in &raw.hotel_list {
        let Some(hotel_id) = lenient_id(&item.hotel_id) else {
            tracing::debug!("Dropping hotel entry without an id");
            continue;
        };

        let price_with_tax =
            lenient_f64(&item.low_rate_info.as_ref().and_then(|r| r.total.clone()));

        hotels.insert(
            hotel_id.clone(),
            HotelOption {
                hotel_id,
                name: item.localized_name.clone().unwrap_or_default(),
                address: lenient_address(&item.address),
                city: item.city.clone().unwrap_or_default(),
                checkout_date,
                star_rating: lenient_f64(&item.hotel_star_rating),
                guest_rating: lenient_f64(&item.hotel_guest_rating),
                total_reviews: lenient_f64(&item.total_reviews),
                percent_recommended: lenient_f64(&item.percent_recommended),
                total_recommendations: lenient_f64(&item.total_recommendations),
                price_with_tax,
                segment_index,
            },
        );
    }

    hotels
}
