//! Startup questions.
//!
//! Four blocking prompts, asked in order: crypto, fiat, trade direction,
//! amount. The amount is free text and is never validated here.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::fmt::Display;

use crate::config::DefaultsConfig;
use crate::types::{Crypto, Fiat, TradeQuestionAnswers, TradeType, WatchError};

/// Position of `default` in `all`, or the first entry when it is missing.
pub fn default_index<T: PartialEq>(all: &[T], default: &T) -> usize {
    all.iter().position(|v| v == default).unwrap_or(0)
}

pub fn crypto_message(default: Crypto) -> String {
    format!("Select crypto (default '{default}')")
}

pub fn fiat_message(default: Fiat) -> String {
    format!("Select fiat (default '{default}')")
}

pub fn trade_type_message(default: TradeType) -> String {
    format!("Select exchange type (default: '{default}')")
}

pub const AMOUNT_MESSAGE: &str = "Enter Amount";

const BANNER_ICON: &str = "💰";
const BANNER: &str = "P2P: BUY/SELL Questions";

/// Heading printed above the questions.
pub fn banner() -> String {
    format!("{BANNER_ICON}  {}", BANNER.bold().underline())
}

fn select<T: Copy + PartialEq + Display>(
    theme: &ColorfulTheme,
    message: String,
    all: &'static [T],
    default: T,
) -> Result<T> {
    let index = Select::with_theme(theme)
        .with_prompt(message)
        .items(all)
        .default(default_index(all, &default))
        .interact()
        .map_err(|e| WatchError::Prompt(e.to_string()))?;
    Ok(all[index])
}

/// Ask all four questions and collect the answers.
pub fn ask_questions(defaults: &DefaultsConfig) -> Result<TradeQuestionAnswers> {
    println!("{}\n", banner());

    let theme = ColorfulTheme::default();
    let crypto = select(&theme, crypto_message(defaults.crypto), Crypto::ALL, defaults.crypto)
        .context("Crypto selection aborted")?;
    let fiat = select(&theme, fiat_message(defaults.fiat), Fiat::ALL, defaults.fiat)
        .context("Fiat selection aborted")?;
    let trade_type = select(
        &theme,
        trade_type_message(defaults.trade_type),
        TradeType::ALL,
        defaults.trade_type,
    )
    .context("Trade type selection aborted")?;

    let trans_amount = Input::<String>::with_theme(&theme)
        .with_prompt(AMOUNT_MESSAGE)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| WatchError::Prompt(e.to_string()))
        .context("Amount input aborted")?;

    Ok(TradeQuestionAnswers {
        crypto,
        fiat,
        trade_type,
        trans_amount,
    })
}
