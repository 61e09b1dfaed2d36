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

//! # Flight Search Client
//!
//! Effectful (time, network) operations against the flight-search provider.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use wayfare_provider_gate::ProviderGate;
use wreq::redirect::Policy;
use wreq_util::Emulation;

use crate::flights_query_builder::FlightSearchRequest;
use crate::flights_results_parser::RawFlightResponse;
use crate::providers::FlightProvider;

const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/qpxExpress/v1/trips/search";

#[derive(Clone)]
pub struct QpxFlightsClient {
    client: Arc<wreq::Client>,
    gate: ProviderGate,
    endpoint: String,
    api_key: String,
}

impl QpxFlightsClient {
    pub fn new(api_key: String, timeout_secs: u64, queries_per_second: u32) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string(), api_key, timeout_secs, queries_per_second)
    }

    pub fn with_endpoint(
        endpoint: String,
        api_key: String,
        timeout_secs: u64,
        queries_per_second: u32,
    ) -> Result<Self> {
        let client = wreq::Client::builder()
            .emulation(Emulation::Safari18_5)
            .redirect(Policy::default())
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        let gate = ProviderGate::with_qps_limit(queries_per_second as u64);
        Ok(Self {
            client: Arc::new(client),
            gate,
            endpoint,
            api_key,
        })
    }

    async fn fetch_raw(&self, request: &FlightSearchRequest) -> Result<RawFlightResponse> {
        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let body = serde_json::to_value(request).context("Encode flight request")?;
        let client_inner = Arc::clone(&self.client);

        let fetch_start = std::time::Instant::now();
        let response = self
            .gate
            .admit(move || {
                let http_client = client_inner.clone();
                async move {
                    tracing::trace!("[fetch_raw] Posting flight query");
                    let resp = http_client.post(&url).json(&body).send().await?;
                    Ok(resp)
                }
            })
            .await
            .map_err(|e| anyhow!("Request failed: {:?}", e))?;
        tracing::debug!(
            "[fetch_raw] Gate + HTTP execution time: {:?}",
            fetch_start.elapsed()
        );

        let status = response.status();
        let text = response.text().await.context("Read body")?;
        tracing::debug!(
            "[fetch_raw] HTTP Status: {}, body {} KB",
            status.as_u16(),
            text.len() / 1024
        );

        if !status.is_success() {
            let body_preview = text.chars().take(500).collect::<String>();
            bail!("HTTP error {}: {}", status, body_preview);
        }

        serde_json::from_str(&text).with_context(|| {
            let preview = text.chars().take(300).collect::<String>();
            format!("Unexpected flight response shape. Body preview: {preview}")
        })
    }
}

impl FlightProvider for QpxFlightsClient {
    fn search(
        &self,
        request: &FlightSearchRequest,
    ) -> impl Future<Output = Result<RawFlightResponse>> + Send {
        async move { self.fetch_raw(request).await }
    }
}
