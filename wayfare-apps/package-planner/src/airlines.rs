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

//! # Airline directory
//!
//! Embedded IATA-code to display-name table behind the [`AirlineDirectory`]
//! trait. Codes the provider can return but that are missing here surface as
//! lookup misses and the containing flight item is skipped.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::providers::AirlineDirectory;

static IATA_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("AA", "American Airlines"),
        ("AC", "Air Canada"),
        ("AF", "Air France"),
        ("AM", "Aeroméxico"),
        ("AS", "Alaska Airlines"),
        ("AV", "Avianca"),
        ("AY", "Finnair"),
        ("AZ", "ITA Airways"),
        ("B6", "JetBlue Airways"),
        ("BA", "British Airways"),
        ("BR", "EVA Air"),
        ("CA", "Air China"),
        ("CI", "China Airlines"),
        ("CM", "Copa Airlines"),
        ("CX", "Cathay Pacific"),
        ("CZ", "China Southern Airlines"),
        ("DL", "Delta Air Lines"),
        ("EK", "Emirates"),
        ("ET", "Ethiopian Airlines"),
        ("EY", "Etihad Airways"),
        ("F9", "Frontier Airlines"),
        ("FI", "Icelandair"),
        ("FJ", "Fiji Airways"),
        ("GA", "Garuda Indonesia"),
        ("HA", "Hawaiian Airlines"),
        ("IB", "Iberia"),
        ("JL", "Japan Airlines"),
        ("KE", "Korean Air"),
        ("KL", "KLM Royal Dutch Airlines"),
        ("LA", "LATAM Airlines"),
        ("LH", "Lufthansa"),
        ("LO", "LOT Polish Airlines"),
        ("LX", "Swiss International Air Lines"),
        ("MH", "Malaysia Airlines"),
        ("MU", "China Eastern Airlines"),
        ("NH", "All Nippon Airways"),
        ("NK", "Spirit Airlines"),
        ("NZ", "Air New Zealand"),
        ("OS", "Austrian Airlines"),
        ("OZ", "Asiana Airlines"),
        ("PR", "Philippine Airlines"),
        ("QF", "Qantas"),
        ("QR", "Qatar Airways"),
        ("SA", "South African Airways"),
        ("SK", "Scandinavian Airlines"),
        ("SN", "Brussels Airlines"),
        ("SQ", "Singapore Airlines"),
        ("SU", "Aeroflot"),
        ("SV", "Saudia"),
        ("TG", "Thai Airways"),
        ("TK", "Turkish Airlines"),
        ("TP", "TAP Air Portugal"),
        ("UA", "United Airlines"),
        ("UX", "Air Europa"),
        ("VA", "Virgin Australia"),
        ("VN", "Vietnam Airlines"),
        ("VS", "Virgin Atlantic"),
        ("WN", "Southwest Airlines"),
        ("WS", "WestJet"),
    ])
});

/// Directory backed by the embedded table above.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAirlineDirectory;

impl AirlineDirectory for StaticAirlineDirectory {
    fn lookup(&self, iata_code: &str) -> Option<&str> {
        IATA_NAMES.get(iata_code).copied()
    }
}
