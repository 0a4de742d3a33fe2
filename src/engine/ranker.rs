//! Offer ranking and price-tier colouring.
//!
//! Display order and tier order are two separate passes over the same
//! unsorted input. Tiers reflect pure price rank; display position also
//! weighs advertiser reliability.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::Offer;

/// Colour bucket for a price rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Best,
    Good,
    Medium,
    Normal,
}

impl Tier {
    /// Tier for the k-th distinct ascending price (0-indexed).
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => Tier::Best,
            1 => Tier::Good,
            2 => Tier::Medium,
            _ => Tier::Normal,
        }
    }
}

/// Price string → tier, as produced by [`map_color`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTiers(HashMap<String, Tier>);

impl PriceTiers {
    /// Tier for an exact price string; unknown prices are `Normal`.
    pub fn tier_of(&self, price: &str) -> Tier {
        self.0.get(price).copied().unwrap_or(Tier::Normal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ascending numeric price; unparseable prices sort last.
fn cmp_price(a: &Offer, b: &Offer) -> Ordering {
    fn key(o: &Offer) -> (bool, Option<Decimal>) {
        let v = o.adv.price_value();
        (v.is_none(), v)
    }
    key(a).cmp(&key(b))
}

/// Display order: price ascending, then finish rate descending.
pub fn sort_order(offers: &[Offer]) -> Vec<Offer> {
    let mut sorted = offers.to_vec();
    sorted.sort_by(|a, b| {
        cmp_price(a, b).then_with(|| {
            b.advertiser
                .month_finish_rate
                .total_cmp(&a.advertiser.month_finish_rate)
        })
    });
    sorted
}

/// Tier order: price ascending only (stable).
pub fn sort_order_min_price(offers: &[Offer]) -> Vec<Offer> {
    let mut sorted = offers.to_vec();
    sorted.sort_by(cmp_price);
    sorted
}

/// Assign tiers by walking a price-ordered list and counting distinct
/// price strings.
pub fn map_color(price_ordered: &[Offer]) -> PriceTiers {
    let mut tiers = HashMap::new();
    for offer in price_ordered {
        if !tiers.contains_key(&offer.adv.price) {
            let rank = tiers.len();
            tiers.insert(offer.adv.price.clone(), Tier::from_rank(rank));
        }
    }
    PriceTiers(tiers)
}
