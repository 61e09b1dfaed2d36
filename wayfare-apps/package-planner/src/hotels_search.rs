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

//! # Hotel Search Client
//!
//! Effectful (time, network) operations against the hotel-search provider.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use wayfare_provider_gate::ProviderGate;
use wreq::redirect::Policy;
use wreq_util::Emulation;

use crate::hotels_query_builder::HotelSearchRequest;
use crate::hotels_results_parser::RawHotelResponse;
use crate::providers::HotelProvider;

#[derive(Clone)]
pub struct ExpediaHotelsClient {
    client: Arc<wreq::Client>,
    gate: ProviderGate,
}

impl ExpediaHotelsClient {
    pub fn new(max_concurrent: u64) -> Result<Self> {
        let client = wreq::Client::builder()
            .emulation(Emulation::Safari18_5)
            .redirect(Policy::default())
            .build()
            .context("Failed to build HTTP client")?;
        let gate = ProviderGate::with_concurrency_limit(max_concurrent);
        Ok(Self {
            client: Arc::new(client),
            gate,
        })
    }

    async fn fetch_raw(&self, request: &HotelSearchRequest) -> Result<RawHotelResponse> {
        let url = request.search_url();
        let client_inner = Arc::clone(&self.client);

        let response = self
            .gate
            .admit(move || {
                let http_client = client_inner.clone();
                async move {
                    tracing::info!("Fetching hotel search URL: {}", url);
                    let resp = http_client.get(&url).send().await?;
                    Ok(resp)
                }
            })
            .await
            .map_err(|e| anyhow!("Request failed: {:?}", e))?;

        let status = response.status();
        let body = response.text().await.context("Read body")?;
        tracing::debug!(
            "Response: {} chars, status={}",
            body.chars().count(),
            status
        );

        if !status.is_success() {
            let body_preview = body.chars().take(300).collect::<String>();
            bail!("HTTP error {}: {}", status, body_preview);
        }

        serde_json::from_str(&body).with_context(|| {
            let preview = body.chars().take(300).collect::<String>();
            format!("Unexpected hotel response shape. Body preview: {preview}")
        })
    }
}

impl HotelProvider for ExpediaHotelsClient {
    fn search(
        &self,
        request: &HotelSearchRequest,
    ) -> impl Future<Output = Result<RawHotelResponse>> + Send {
        async move { self.fetch_raw(request).await }
    }
}
