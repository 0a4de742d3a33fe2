//! Borderless, fixed-width offer table.

use colored::{ColoredString, Colorize};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::engine::ranker::{PriceTiers, Tier};
use crate::types::Offer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    width: usize,
    align: Align,
}

const COLUMNS: [Column; 6] = [
    Column { header: "Success", width: 10, align: Align::Left },
    Column { header: "Price", width: 8, align: Align::Right },
    Column { header: "Available", width: 15, align: Align::Right },
    Column { header: "Order", width: 8, align: Align::Right },
    Column { header: "Name", width: 25, align: Align::Left },
    Column { header: "Link", width: 95, align: Align::Left },
];

const SEPARATOR: &str = " ";
const ELLIPSIS: char = '…';

fn tier_rgb(tier: Tier) -> (u8, u8, u8) {
    match tier {
        Tier::Best => (0x00, 0xff, 0x00),
        Tier::Good => (0xff, 0xff, 0x00),
        Tier::Medium => (0xff, 0xbf, 0x00),
        Tier::Normal => (0xff, 0xff, 0xff),
    }
}

/// A cell's visible text plus the styling applied after padding.
struct Cell {
    text: String,
    style: Style,
}

enum Style {
    Plain,
    Tier(Tier),
    Header,
}

impl Cell {
    fn plain(text: String) -> Self {
        Self { text, style: Style::Plain }
    }

    fn tinted(text: String, tier: Tier) -> Self {
        Self { text, style: Style::Tier(tier) }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self.style {
            Style::Plain => text.normal(),
            Style::Header => text.red(),
            Style::Tier(tier) => {
                let (r, g, b) = tier_rgb(tier);
                text.truecolor(r, g, b)
            }
        }
    }

    /// Truncate to the column width, pad on display width, then colour.
    fn layout(&self, column: &Column) -> String {
        let visible = truncate(&self.text, column.width);
        let pad = " ".repeat(column.width.saturating_sub(visible.width()));
        let painted = self.paint(&visible);
        match column.align {
            Align::Left => format!("{painted}{pad}"),
            Align::Right => format!("{pad}{painted}"),
        }
    }
}

/// Cut to `width` terminal columns, ending in an ellipsis when shortened.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

/// Fixed-point text with ties rounded away from zero.
fn to_fixed(value: f64, fraction_digits: usize) -> String {
    match Decimal::from_f64(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(
                fraction_digits as u32,
                RoundingStrategy::MidpointAwayFromZero,
            );
            format!("{:.*}", fraction_digits, rounded)
        }
        None => format!("{:.*}", fraction_digits, value),
    }
}

/// Format with en-US thousands separators and exactly `fraction_digits`
/// decimals. Halves round away from zero.
pub fn format_thousands(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = to_fixed(value.abs(), fraction_digits);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }

    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn row_cells(offer: &Offer, tiers: &PriceTiers, endpoint: &str) -> [Cell; 6] {
    let rate_pct = offer.advertiser.month_finish_rate * 100.0;
    let rate_text = format!("{}%", to_fixed(rate_pct, 2));
    let rate_cell = if rate_pct == 100.0 {
        Cell::tinted(rate_text, Tier::Best)
    } else {
        Cell::plain(rate_text)
    };

    [
        rate_cell,
        Cell::tinted(offer.adv.price.clone(), tiers.tier_of(&offer.adv.price)),
        Cell::plain(format_thousands(offer.adv.available(), 2)),
        Cell::plain(format_thousands(offer.advertiser.month_order_count as f64, 0)),
        Cell::plain(offer.advertiser.nick_name.clone()),
        Cell::plain(offer.advertiser.profile_url(endpoint)),
    ]
}

fn join_row(cells: &[Cell; 6]) -> String {
    cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, column)| cell.layout(column))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Render display-ordered offers. Price colours come from `tiers`, which
/// is computed independently from a price-only ordering.
pub fn render_table(offers: &[Offer], tiers: &PriceTiers, endpoint: &str) -> String {
    let header = COLUMNS.map(|c| Cell { text: c.header.to_string(), style: Style::Header });

    let mut lines = Vec::with_capacity(offers.len() + 1);
    lines.push(join_row(&header));
    for offer in offers {
        lines.push(join_row(&row_cells(offer, tiers, endpoint)));
    }
    lines.join("\n")
}
