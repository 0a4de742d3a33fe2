//! One fetch → rank → render cycle.
//!
//! A cycle never returns an error: API rejections render the (usually
//! empty) table with a status line, and fetch failures render a
//! "cycle failed" frame so the next tick starts clean.

use chrono::Local;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::ranker::{map_color, sort_order, sort_order_min_price};
use crate::config::CycleConfig;
use crate::display::{api_status_line, failure_status_line, render_frame, render_table, Screen};
use crate::exchange::{FetchError, OfferSource};
use crate::types::{Offer, OfferRequest};

/// What a single cycle ended up drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered { offers: usize },
    ApiRejected { status: StatusCode, offers: usize },
    Failed { reason: String },
}

/// Everything one cycle needs. Cheap to share across spawned cycles.
pub struct PollCycle {
    config: Arc<CycleConfig>,
    source: Arc<dyn OfferSource>,
    screen: Arc<dyn Screen>,
}

impl PollCycle {
    pub fn new(
        config: Arc<CycleConfig>,
        source: Arc<dyn OfferSource>,
        screen: Arc<dyn Screen>,
    ) -> Self {
        Self { config, source, screen }
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Rank and render a set of offers into the table body.
    fn render_offers(&self, offers: &[Offer]) -> String {
        let display = sort_order(offers);
        let tiers = map_color(&sort_order_min_price(offers));
        render_table(&display, &tiers, &self.config.endpoint)
    }

    fn draw(&self, body: &str) {
        let frame = render_frame(Local::now(), self.config.interval, body);
        if let Err(e) = self.screen.redraw(&frame) {
            warn!(error = %e, "Failed to redraw screen");
        }
    }

    pub async fn run_once(&self) -> CycleOutcome {
        let request = OfferRequest::from_answers(&self.config.answers, self.config.rows);

        match self.source.fetch_offers(&request).await {
            Ok(response) => {
                let offers = response.data.len();
                debug!(offers, "Cycle fetched offers");
                self.draw(&self.render_offers(&response.data));
                CycleOutcome::Rendered { offers }
            }
            Err(FetchError::Api { status, body, .. }) => {
                let offers = body.data.len();
                let table = self.render_offers(&body.data);
                let status_line = api_status_line(status.as_u16(), body.message.as_deref());
                self.draw(&format!("{table}\n\n{status_line}"));
                CycleOutcome::ApiRejected { status, offers }
            }
            Err(e) => {
                let reason = e.to_string();
                error!(error = %reason, "Cycle failed, retrying on next tick");
                self.draw(&failure_status_line(&reason, self.config.interval));
                CycleOutcome::Failed { reason }
            }
        }
    }
}
