//! P2P-WATCH: live terminal monitor for peer-to-peer crypto offers
//!
//! Entry point. Loads configuration, initialises structured logging,
//! asks the startup questions, then redraws the offer table on a fixed
//! interval until Ctrl+C.

use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

use p2p_watch::config::{self, AppConfig, CycleConfig};
use p2p_watch::display::TerminalScreen;
use p2p_watch::engine::poller::PollCycle;
use p2p_watch::engine::scheduler::Scheduler;
use p2p_watch::exchange::binance::BinanceP2pClient;
use p2p_watch::exchange::OfferSource;
use p2p_watch::prompt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = AppConfig::load_or_default(config::DEFAULT_CONFIG_FILE)?;
    info!(
        endpoint = %cfg.exchange.endpoint,
        interval_ms = cfg.poll.interval_ms,
        rows = cfg.exchange.rows,
        "P2P-WATCH starting up"
    );

    // The prompt blocks on stdin, keep it off the async workers.
    let defaults = cfg.defaults.clone();
    let answers = tokio::task::spawn_blocking(move || prompt::ask_questions(&defaults)).await??;
    info!(
        crypto = %answers.crypto,
        fiat = %answers.fiat,
        trade_type = %answers.trade_type,
        amount = %answers.trans_amount,
        "Answers collected"
    );

    println!("\n");
    println!("P2P: {} \n", cfg.exchange.endpoint.as_str().bold().underline());

    let source = BinanceP2pClient::new(&cfg.exchange.endpoint, cfg.request_timeout())?;
    info!(source = source.name(), "Offer source ready");

    let cycle = Arc::new(PollCycle::new(
        Arc::new(CycleConfig::new(&cfg, answers)),
        Arc::new(source),
        Arc::new(TerminalScreen::new()),
    ));

    let scheduler = Scheduler::every(cycle.config().interval);
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let ticks = scheduler
        .run(shutdown, move || {
            let cycle = Arc::clone(&cycle);
            async move {
                cycle.run_once().await;
            }
        })
        .await;

    info!(ticks, "Shutdown signal received.");
    Ok(())
}

/// Initialise the `tracing` subscriber on stderr so log lines do not
/// interleave with the redrawn table on stdout.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("p2p_watch=warn"));

    let json_logging = std::env::var("P2P_WATCH_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }
}
