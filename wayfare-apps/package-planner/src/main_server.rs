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

//! # HTTP boundary
//!
//! Thin axum front over the planner core: `/flights`, `/hotels` and
//! `/packages`, each taking numbered query parameters for up to five
//! itinerary segments. The error's display message is the user-visible
//! failure payload.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error, Result};
use axum::Json;
use axum::extract::{ConnectInfo, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::NaiveDate;
use clap::Parser;
use http::StatusCode;
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_package_planner::{
    ExpediaHotelsClient, FlightOption, HotelOption, HotelProvider, HotelSearchRequest, Itinerary,
    PackagePlanner, PackageSet, PlanError, QpxFlightsClient, Segment, StaticAirlineDirectory,
    normalize_hotels,
};

#[derive(Parser, Debug)]
#[command(name = "wayfare-server")]
#[command(author, version, about = "HTTP server for trip package planning")]
struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Flight provider API key
    #[arg(long, env = "WAYFARE_FLIGHTS_API_KEY", default_value = "")]
    api_key: String,

    /// Provider request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,
}

type HttpPlanner = PackagePlanner<QpxFlightsClient, ExpediaHotelsClient, StaticAirlineDirectory>;

#[derive(Clone)]
struct AppState {
    planner: Arc<HttpPlanner>,
    hotels: ExpediaHotelsClient,
}

/// `PlanError` rendered as an HTTP response.
struct AppError(PlanError);

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PlanError::Validation(_) => StatusCode::BAD_REQUEST,
            PlanError::NoOptions { .. } | PlanError::NoPackage => StatusCode::NOT_FOUND,
            PlanError::Provider(_) | PlanError::Lookup { .. } => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!("Request failed ({}): {}", status, self.0);
        (status, self.0.to_string()).into_response()
    }
}

/// Numbered segment parameters shared by `/flights` and `/packages`.
#[derive(Debug, Deserialize)]
struct TripQuery {
    budget: i64,
    seg: usize,
    star: Option<f64>,
    origin1: Option<String>,
    dest1: Option<String>,
    date1: Option<String>,
    origin2: Option<String>,
    dest2: Option<String>,
    date2: Option<String>,
    origin3: Option<String>,
    dest3: Option<String>,
    date3: Option<String>,
    origin4: Option<String>,
    dest4: Option<String>,
    date4: Option<String>,
    origin5: Option<String>,
    dest5: Option<String>,
    date5: Option<String>,
}

impl TripQuery {
    /// Collect the numbered parameters into an indexed segment sequence.
    fn itinerary(&self) -> Result<Itinerary, PlanError> {
        let numbered = [
            (&self.origin1, &self.dest1, &self.date1),
            (&self.origin2, &self.dest2, &self.date2),
            (&self.origin3, &self.dest3, &self.date3),
            (&self.origin4, &self.dest4, &self.date4),
            (&self.origin5, &self.dest5, &self.date5),
        ];
        if self.seg == 0 || self.seg > numbered.len() {
            return Err(PlanError::validation(format!(
                "seg must be between 1 and {}, got {}",
                numbered.len(),
                self.seg
            )));
        }

        let mut segments = Vec::with_capacity(self.seg);
        for (index, (origin, dest, date)) in numbered.iter().take(self.seg).enumerate() {
            let n = index + 1;
            let origin = origin
                .as_deref()
                .ok_or_else(|| PlanError::validation(format!("missing origin{n}")))?;
            let dest = dest
                .as_deref()
                .ok_or_else(|| PlanError::validation(format!("missing dest{n}")))?;
            let date = date
                .as_deref()
                .ok_or_else(|| PlanError::validation(format!("missing date{n}")))?;
            let depart_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                PlanError::validation(format!("date{n} is not an ISO date: {date:?}"))
            })?;
            segments.push(Segment::new(origin, dest, depart_date));
        }
        Itinerary::new(segments)
    }
}

#[derive(Debug, Deserialize)]
struct HotelsQuery {
    city: String,
    checkin: String,
    checkout: String,
}

/// Liveness only, mirrors nothing but a 200 to keep probes cheap.
async fn root(ConnectInfo(addr): ConnectInfo<SocketAddr>) -> &'static str {
    tracing::info!("New visitor: {}", addr.ip());
    "200"
}

async fn flights(
    State(state): State<AppState>,
    Query(query): Query<TripQuery>,
) -> Result<Json<Vec<FlightOption>>, AppError> {
    let itinerary = query.itinerary()?;
    let options = state.planner.compute_flights(query.budget, &itinerary).await?;
    Ok(Json(options))
}

async fn hotels(
    State(state): State<AppState>,
    Query(query): Query<HotelsQuery>,
) -> Result<Json<Vec<HotelOption>>, AppError> {
    let request = HotelSearchRequest::new(&query.city, &query.checkin, &query.checkout)?;
    let raw = state
        .hotels
        .search(&request)
        .await
        .map_err(PlanError::Provider)?;
    let normalized = normalize_hotels(&raw, request.checkout(), 0);
    Ok(Json(normalized.into_values().collect()))
}

async fn packages(
    State(state): State<AppState>,
    Query(query): Query<TripQuery>,
) -> Result<Json<PackageSet>, AppError> {
    let itinerary = query.itinerary()?;
    let set = state
        .planner
        .compute_packages(query.budget, query.star, &itinerary)
        .await?;
    Ok(Json(set))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".to_string().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();
    tracing::debug!("Parsed args: {:?}", args);

    let flights_client = QpxFlightsClient::new(args.api_key, args.timeout, 2)
        .context("Failed to create flights client")?;
    let hotels_client = ExpediaHotelsClient::new(4).context("Failed to create hotels client")?;
    let state = AppState {
        planner: Arc::new(PackagePlanner::new(
            flights_client,
            hotels_client.clone(),
            StaticAirlineDirectory,
        )),
        hotels: hotels_client,
    };

    let app = axum::Router::new()
        .route("/", get(root))
        .route("/flights", get(flights))
        .route("/hotels", get(hotels))
        .route("/packages", get(packages))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host:port")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    Ok(())
}
