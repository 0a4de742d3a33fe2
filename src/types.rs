//! Shared types for P2P-WATCH.
//!
//! The user's answers, the request sent to the exchange, and the offer
//! envelope it returns. Nothing here outlives a poll cycle except
//! [`TradeQuestionAnswers`], which is collected once at startup.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Selectable enums
// ---------------------------------------------------------------------------

/// Declares a wire-named enum with `ALL`, `as_str`, `Display` and `FromStr`.
macro_rules! code_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in prompt order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The code as sent to the exchange.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = WatchError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| WatchError::UnknownCode {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }
    };
}

code_enum! {
    /// Crypto assets offered in the prompt.
    Crypto { USDT, BTC, BNB, BUSD, ETH, DAI }
}

code_enum! {
    /// Fiat currencies offered in the prompt.
    Fiat {
        ARS, EUR, USD, AED, AUD, BDT, BHD, BOB, BRL, CAD, CLP, CNY, COP, CRC,
        CZK, DOP, DZD, EGP, GBP, GEL, GHS, HKD, IDR, INR, JPY, KES, KHR, KRW,
        KWD, KZT, LAK, LBP, LKR, MAD, MMK, MXN, MYR, NGN, OMR, PAB, PEN, PHP,
        PKR, PLN, PYG, QAR, RON, RUB, SAR, SDG, SEK, SGD, THB, TND, TRY, TWD,
        UAH, UGX, UYU, VES, VND, ZAR,
    }
}

code_enum! {
    /// Trade direction, from the user's point of view.
    TradeType { Buy, Sell }
}

// ---------------------------------------------------------------------------
// Request side
// ---------------------------------------------------------------------------

/// The four answers collected by the startup prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeQuestionAnswers {
    pub crypto: Crypto,
    pub fiat: Fiat,
    pub trade_type: TradeType,
    /// Free text; the exchange is the only validator.
    pub trans_amount: String,
}

/// JSON body for the offer search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    pub page: u32,
    pub rows: u32,
    pub asset: Crypto,
    pub trade_type: TradeType,
    pub fiat: Fiat,
    pub trans_amount: String,
}

impl OfferRequest {
    /// First page is the only page ever requested.
    pub const FIRST_PAGE: u32 = 1;

    /// Build the request for one poll cycle. Never fails, never validates.
    pub fn from_answers(answers: &TradeQuestionAnswers, rows: u32) -> Self {
        Self {
            page: Self::FIRST_PAGE,
            rows,
            asset: answers.crypto,
            trade_type: answers.trade_type,
            fiat: answers.fiat,
            trans_amount: answers.trans_amount.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response side
// ---------------------------------------------------------------------------

/// Response envelope. Error payloads share the shape, usually with an
/// absent or `null` `data`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Offer>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// One advertisement plus the advertiser behind it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Offer {
    pub adv: Adv,
    pub advertiser: Advertiser,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adv {
    /// Decimal string, kept verbatim for display and tier lookup.
    pub price: String,
    /// Remaining tradable quantity, decimal string.
    #[serde(default)]
    pub surplus_amount: String,
    #[serde(default)]
    pub min_single_trans_amount: Option<String>,
    #[serde(default)]
    pub max_single_trans_amount: Option<String>,
}

impl Adv {
    /// Numeric price, `None` when the exchange sent something unparseable.
    pub fn price_value(&self) -> Option<Decimal> {
        Decimal::from_str(self.price.trim()).ok()
    }

    /// Available quantity as a float; unparseable amounts read as zero.
    pub fn available(&self) -> f64 {
        self.surplus_amount.trim().parse().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertiser {
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub user_no: String,
    #[serde(default)]
    pub month_order_count: u64,
    /// Fraction of completed trades over the trailing month, 0.0–1.0.
    #[serde(default)]
    pub month_finish_rate: f64,
}

impl Advertiser {
    /// Public profile page for this advertiser.
    pub fn profile_url(&self, endpoint: &str) -> String {
        format!(
            "{}/en/advertiserDetail?advertiserNo={}",
            endpoint.trim_end_matches('/'),
            self.user_no
        )
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Application errors outside the fetch path.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Unknown {kind} code: {value}")]
    UnknownCode { kind: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
impl Offer {
    /// Helper to build a test offer with sensible defaults.
    pub fn sample(price: &str, finish_rate: f64) -> Self {
        Offer {
            adv: Adv {
                price: price.to_string(),
                surplus_amount: "1000.00".to_string(),
                min_single_trans_amount: None,
                max_single_trans_amount: None,
            },
            advertiser: Advertiser {
                nick_name: format!("seller-{price}-{finish_rate}"),
                user_no: "s1234567890".to_string(),
                month_order_count: 120,
                month_finish_rate: finish_rate,
            },
        }
    }
}
