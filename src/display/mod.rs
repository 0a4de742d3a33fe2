//! Terminal output: the offer table, the frame around it, and the
//! in-place redraw sink.

pub mod screen;
pub mod table;

use chrono::{DateTime, Local};
use colored::Colorize;
use std::time::Duration;

pub use screen::{Screen, TerminalScreen};
pub use table::{format_thousands, render_table};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp header, a blank line, the body, and a trailing blank line.
pub fn render_frame(now: DateTime<Local>, interval: Duration, body: &str) -> String {
    let stamp = now.format(TIMESTAMP_FORMAT).to_string();
    format!(
        "DATE: {}  (refresh {}s)\n\n{body}\n\n",
        stamp.as_str().bold().underline(),
        interval.as_secs_f64(),
    )
}

/// Status shown under the table when the exchange rejected the request.
pub fn api_status_line(status: u16, message: Option<&str>) -> String {
    let detail = message.unwrap_or("no message");
    let line = format!("exchange returned HTTP {status}: {detail}");
    line.as_str().yellow().to_string()
}

/// Status shown in place of the table when a cycle could not fetch at all.
pub fn failure_status_line(reason: &str, interval: Duration) -> String {
    let line = format!("cycle failed, retrying in {}s: {reason}", interval.as_secs_f64());
    line.as_str().red().to_string()
}

/// Strip SGR escape sequences, leaving the visible text.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
