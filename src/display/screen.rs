//! In-place redraw sink.
//!
//! Each frame replaces the previous one. Concurrent cycles may race to
//! draw; whichever call runs last is what stays on screen.

use crossterm::{
    cursor::MoveToPreviousLine,
    queue,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use std::sync::Mutex;
use unicode_width::UnicodeWidthStr;

use super::strip_ansi;

/// Anything that can show a rendered frame.
pub trait Screen: Send + Sync {
    fn redraw(&self, frame: &str) -> io::Result<()>;
}

/// Stdout screen that erases the previously drawn block before writing.
#[derive(Default)]
pub struct TerminalScreen {
    /// Terminal rows occupied by the last frame.
    drawn_rows: Mutex<usize>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Rows a frame occupies once wrapped at `columns`. The cursor ends on
/// the row after a trailing newline, so only newline-terminated rows count.
pub fn wrapped_rows(frame: &str, columns: usize) -> usize {
    let columns = columns.max(1);
    let mut rows = 0;
    let mut segments = frame.split('\n').peekable();
    while let Some(line) = segments.next() {
        if segments.peek().is_none() {
            // Text after the last newline keeps the cursor on that row.
            let width = strip_ansi(line).width();
            if width > 0 {
                rows += (width - 1) / columns;
            }
            break;
        }
        let width = strip_ansi(line).width();
        rows += width.max(1).div_ceil(columns);
    }
    rows
}

impl Screen for TerminalScreen {
    fn redraw(&self, frame: &str) -> io::Result<()> {
        let mut drawn = self
            .drawn_rows
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "screen lock poisoned"))?;
        let columns = terminal::size().map(|(c, _)| c as usize).unwrap_or(usize::MAX);

        let mut out = io::stdout().lock();
        if *drawn > 0 {
            let up = u16::try_from(*drawn).unwrap_or(u16::MAX);
            queue!(out, MoveToPreviousLine(up), Clear(ClearType::FromCursorDown))?;
        }
        out.write_all(frame.as_bytes())?;
        out.flush()?;

        *drawn = wrapped_rows(frame, columns);
        Ok(())
    }
}
