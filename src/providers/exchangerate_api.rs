use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::core::rates::{BASE_CURRENCY, RateTable};
use crate::core::source::{AcquisitionError, LiveRateSource};

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com";

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: RateTable,
}

/// Live rates from exchangerate-api.com's `/v4/latest/USD` endpoint.
pub struct ExchangeRateApiSource {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiSource {
    pub fn new(base_url: &str) -> Result<Self, AcquisitionError> {
        let client = reqwest::Client::builder()
            .user_agent("sparkl-rates/1.0")
            .build()
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn request(&self, url: &str) -> Result<RateTable, AcquisitionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AcquisitionError::Status(response.status().as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;

        let data: LatestRatesResponse =
            serde_json::from_str(&text).map_err(|e| AcquisitionError::Malformed(e.to_string()))?;
        Ok(data.rates)
    }
}

#[async_trait]
impl LiveRateSource for ExchangeRateApiSource {
    #[instrument(name = "ExchangeRateFetch", skip(self, deadline))]
    async fn fetch_rates(&self, deadline: Instant) -> Result<RateTable, AcquisitionError> {
        let url = format!("{}/v4/latest/{}", self.base_url, BASE_CURRENCY);
        debug!("Requesting exchange rates from {}", url);

        let timeout = deadline.saturating_duration_since(Instant::now());
        let rates = tokio::time::timeout_at(deadline, self.request(&url))
            .await
            .map_err(|_| AcquisitionError::Timeout(timeout))??;

        debug!(currencies = rates.len(), "Received exchange rates");
        Ok(rates)
    }
}
