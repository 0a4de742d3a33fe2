//! Binance P2P offer search.
//!
//! Endpoint: POST {base}/bapi/c2c/v2/friendly/c2c/adv/search
//! Auth: none. Body: `{page, rows, asset, tradeType, fiat, transAmount}`.
//! Errors usually come back as the same envelope with `data: null`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::{FetchError, OfferSource};
use crate::types::{OfferRequest, OfferResponse};

const SEARCH_PATH: &str = "/bapi/c2c/v2/friendly/c2c/adv/search";
const SOURCE_NAME: &str = "binance-p2p";

/// Binance P2P client.
pub struct BinanceP2pClient {
    http: Client,
    search_url: String,
}

impl BinanceP2pClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("P2P-WATCH/0.1.0")
            .build()
            .context("Failed to build HTTP client for Binance P2P")?;

        Ok(Self {
            http,
            search_url: Self::search_url(endpoint),
        })
    }

    fn search_url(endpoint: &str) -> String {
        format!("{}{SEARCH_PATH}", endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl OfferSource for BinanceP2pClient {
    async fn fetch_offers(&self, request: &OfferRequest) -> Result<OfferResponse, FetchError> {
        debug!(url = %self.search_url, asset = %request.asset, fiat = %request.fiat, "Fetching offers");

        let response = self
            .http
            .post(&self.search_url)
            .header(CACHE_CONTROL, "no-cache")
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if status.is_success() {
            let body: OfferResponse = serde_json::from_str(&raw)
                .map_err(|source| FetchError::Decode { status, source })?;
            debug!(offers = body.data.len(), "Offers received");
            return Ok(body);
        }

        // Error payloads are best-effort: anything that is not an envelope
        // becomes an empty one and the cycle renders an empty table.
        let body = serde_json::from_str::<OfferResponse>(&raw).unwrap_or_default();
        warn!(status = %status, message = ?body.message, "Exchange returned an error payload");
        Err(FetchError::Api { status, body, raw })
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}
