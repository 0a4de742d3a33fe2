//! Exchange integrations.
//!
//! Defines the `OfferSource` trait and the fetch error taxonomy. The only
//! implementation is the Binance P2P offer search.

pub mod binance;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::types::{OfferRequest, OfferResponse};

/// Why a fetch did not produce a normal response.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The exchange answered with a non-success status. `body` is the
    /// decoded envelope (empty when the payload was not one), `raw` the text.
    #[error("Exchange rejected request ({status}): {raw}")]
    Api {
        status: StatusCode,
        body: OfferResponse,
        raw: String,
    },

    /// No response body at all: DNS, refused connection, timeout.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success status whose body is not an offer envelope.
    #[error("Failed to decode response ({status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

/// Abstraction over anything that can list offers for a request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Fetch one page of offers.
    async fn fetch_offers(&self, request: &OfferRequest) -> Result<OfferResponse, FetchError>;

    /// Source name for logging.
    fn name(&self) -> &str;
}
