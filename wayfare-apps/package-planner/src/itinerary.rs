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

//! # Itinerary model
//!
//! An itinerary is an ordered sequence of segments addressed by integer
//! index. Segment `i`'s destination is where the traveler sleeps before
//! segment `i + 1` departs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

/// Upper bound on segments per trip, which also bounds the hotel-query
/// fan-out.
pub const MAX_SEGMENTS: usize = 5;

/// One origin→destination leg of the traveler's trip, with its planned
/// departure date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
}

impl Segment {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        depart_date: NaiveDate,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            depart_date,
        }
    }
}

/// Ordered, validated sequence of 1 to [`MAX_SEGMENTS`] segments.
/// Deserialization goes through [`Itinerary::new`], so a decoded value
/// upholds the same bounds as a constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Itinerary {
    segments: Vec<Segment>,
}

impl TryFrom<Vec<Segment>> for Itinerary {
    type Error = PlanError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, PlanError> {
        Self::new(segments)
    }
}

impl From<Itinerary> for Vec<Segment> {
    fn from(itinerary: Itinerary) -> Self {
        itinerary.segments
    }
}

impl Itinerary {
    pub fn new(segments: Vec<Segment>) -> Result<Self, PlanError> {
        if segments.is_empty() {
            return Err(PlanError::validation("itinerary has no segments"));
        }
        if segments.len() > MAX_SEGMENTS {
            return Err(PlanError::validation(format!(
                "itinerary has {} segments, maximum is {}",
                segments.len(),
                MAX_SEGMENTS
            )));
        }
        for (i, segment) in segments.iter().enumerate() {
            if segment.origin.trim().is_empty() {
                return Err(PlanError::validation(format!("segment {i} has an empty origin")));
            }
            if segment.destination.trim().is_empty() {
                return Err(PlanError::validation(format!(
                    "segment {i} has an empty destination"
                )));
            }
        }
        Ok(Self { segments })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of intermediate stops needing a hotel, always `len - 1`.
    pub fn stop_count(&self) -> usize {
        self.segments.len() - 1
    }
}
