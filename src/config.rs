//! Configuration loading from TOML with environment variable overrides.
//!
//! Every field has a compiled-in default, so the config file is optional.
//! `P2P_ENDPOINT` and `P2P_POLL_INTERVAL_MS` override whatever was loaded.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::types::{Crypto, Fiat, TradeQuestionAnswers, TradeType, WatchError};

pub const DEFAULT_CONFIG_FILE: &str = "p2p-watch.toml";

const DEFAULT_INTERVAL_MS: u64 = 3000;
const DEFAULT_ENDPOINT: &str = "https://p2p.binance.com";
const DEFAULT_ROWS: u32 = 20;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_ENDPOINT: &str = "P2P_ENDPOINT";
const ENV_INTERVAL_MS: &str = "P2P_POLL_INTERVAL_MS";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub poll: PollConfig,
    pub exchange: ExchangeConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_ms: DEFAULT_INTERVAL_MS }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExchangeConfig {
    pub endpoint: String,
    /// Page size sent with every request.
    pub rows: u32,
    pub timeout_secs: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            rows: DEFAULT_ROWS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Pre-selected prompt answers.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub crypto: Crypto,
    pub fiat: Fiat,
    pub trade_type: TradeType,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            crypto: Crypto::USDT,
            fiat: Fiat::THB,
            trade_type: TradeType::Buy,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, otherwise fall back to the defaults.
    /// Environment overrides and validation are applied either way.
    pub fn load_or_default(path: &str) -> Result<Self> {
        let mut cfg = if Path::new(path).exists() {
            Self::load(path)?
        } else {
            info!(path, "No config file found, using defaults");
            Self::default()
        };
        cfg.apply_overrides(|name| std::env::var(name).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a closure in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.exchange.endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_INTERVAL_MS) {
            self.poll.interval_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_INTERVAL_MS} is not a number: {raw}"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), WatchError> {
        if self.poll.interval_ms == 0 {
            return Err(WatchError::Config("poll.interval_ms must be positive".into()));
        }
        if self.exchange.rows == 0 {
            return Err(WatchError::Config("exchange.rows must be positive".into()));
        }
        if self.exchange.endpoint.trim().is_empty() {
            return Err(WatchError::Config("exchange.endpoint is empty".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.exchange.timeout_secs)
    }
}

/// Immutable state shared by every poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleConfig {
    pub answers: TradeQuestionAnswers,
    pub endpoint: String,
    pub rows: u32,
    pub interval: Duration,
}

impl CycleConfig {
    pub fn new(cfg: &AppConfig, answers: TradeQuestionAnswers) -> Self {
        Self {
            answers,
            endpoint: cfg.exchange.endpoint.trim_end_matches('/').to_string(),
            rows: cfg.exchange.rows,
            interval: cfg.poll_interval(),
        }
    }
}
