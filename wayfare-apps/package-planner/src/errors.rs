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

//! # Error taxonomy
//!
//! Every failure of the planning pipeline is one of these kinds. `Lookup` is
//! recoverable per flight item during normalization; everything else
//! terminates the whole request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed input to a query formatter: non-positive budget, empty
    /// itinerary, bad date.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Transport or provider-side failure of an upstream call. Terminal for
    /// the request, never retried.
    #[error("provider request failed: {0}")]
    Provider(#[source] anyhow::Error),

    /// An airline code with no directory entry. Absorbed per flight item.
    #[error("unknown airline code: {code}")]
    Lookup { code: String },

    /// A segment ended up with zero hotel candidates after the budget and
    /// star filters.
    #[error(
        "no hotel option in segment {segment} matches the price and star filters, \
         please consider raising your budget"
    )]
    NoOptions { segment: usize },

    /// No complete hotel combination survived budget pruning.
    #[error("no hotel combination stays under the budget across all segments")]
    NoPackage,
}

impl PlanError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
