//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays, and the
//! text layout of a projected panel view.
//!
//! ```text
//! ┌────────────────────┐
//! │NORMAL           GRN│  top bar
//! │MAX 100%  SOFT 70%  │  body (modes / torque / fixing)
//! │   SYSTEM LOCKED    │  overlay
//! │PWR ON      BAT  85%│  power and battery
//! └────────────────────┘
//! ```

use core::fmt::Write;

use heapless::String;
use panelsim_core::state::{AutoMode, HammerMode};

use crate::projector::{Body, Indicators, PanelView, Tone, TopBar};

/// Number of character rows on standard display
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on standard display
pub const SCREEN_COLS: usize = 20;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

const ROW_TOP: usize = 0;
const ROW_BODY: usize = 1;
const ROW_OVERLAY: usize = 2;
const ROW_STATUS: usize = 3;

/// Screen buffer for text-mode displays
///
/// Holds the text of every row plus one highlight region per row, and can
/// be presented to any `DisplayBackend` implementation.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Highlight state per row (start_col, end_col)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; SCREEN_ROWS];
        self.dirty = true;
    }

    /// Set the content of a specific row
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.lines[row].clear();
            // Truncate if too long
            let text = if text.len() > LINE_LEN {
                &text[..LINE_LEN]
            } else {
                text
            };
            let _ = self.lines[row].push_str(text);
            self.dirty = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Set highlight (invert) region for a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if row < SCREEN_ROWS {
            self.highlights[row] = Some((start_col, end_col));
            self.dirty = true;
        }
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Lay out a panel view
    ///
    /// Leaves the screen clean if the text and highlights are unchanged, so
    /// a backend only redraws when something visible moved.
    pub fn render(&mut self, view: &PanelView) {
        let mut next = Screen::new();
        next.set_line(ROW_TOP, &top_line(&view.top));
        next.render_body(&view.body);
        if view.lock_overlay {
            next.set_line(ROW_OVERLAY, "   SYSTEM LOCKED");
        }
        next.set_line(ROW_STATUS, &status_line(view));

        if next.lines != self.lines || next.highlights != self.highlights {
            self.lines = next.lines;
            self.highlights = next.highlights;
            self.dirty = true;
        }
    }

    fn render_body(&mut self, body: &Body) {
        let mut line: String<LINE_LEN> = String::new();
        match *body {
            Body::Modes {
                active, disabled, ..
            } => {
                let _ = line.push_str("MAX 100%  SOFT 70%");
                self.set_line(ROW_BODY, &line);
                if !disabled {
                    let (start, end) = match active {
                        HammerMode::Max => (0, 8),
                        HammerMode::Soft => (10, 18),
                    };
                    self.set_highlight(ROW_BODY, start, end);
                }
            }
            Body::Torque {
                indicators,
                digits,
                disabled,
                ..
            } => {
                let _ = write!(
                    line,
                    "{}   TQ {}{}{}",
                    indicator_flags(&indicators).as_str(),
                    digits[0],
                    digits[1],
                    if disabled { " X" } else { "" }
                );
                self.set_line(ROW_BODY, &line);
            }
            Body::Fixing {
                auto_mode,
                speed,
                disabled,
            } => {
                let _ = line.push_str("SLOW STOP  SPD 1 2 3");
                self.set_line(ROW_BODY, &line);
                if !disabled {
                    let speed_col = 13 + 2 * speed.get();
                    self.set_highlight(ROW_BODY, speed_col, speed_col + 1);
                }
                // Auto mode lamp goes on the overlay row, under its label
                let lamp = match auto_mode {
                    AutoMode::SlowDown => " ^",
                    AutoMode::Stop => "      ^",
                };
                self.set_line(ROW_OVERLAY, lamp);
            }
        }
    }
}

fn top_line(top: &TopBar) -> String<LINE_LEN> {
    let mut line: String<LINE_LEN> = String::new();
    match top {
        TopBar::Solid { lamp, label } => {
            let blink = if lamp.blink { "!" } else { "" };
            let _ = write!(line, "{:<13}{:>4}{:>3}", label, blink, lamp.tone.code());
        }
        TopBar::Segmented(bars) => {
            let _ = line.push('[');
            for bar in bars {
                let _ = line.push(if bar.tone.is_lit() { '#' } else { '.' });
            }
            let _ = line.push(']');
            let tone = bars.iter().map(|b| b.tone).find(|t| t.is_lit()).unwrap_or(Tone::Off);
            let blink = bars.iter().any(|b| b.blink);
            let _ = write!(line, "{:>10}{}", if blink { "!" } else { "" }, tone.code());
        }
    }
    line
}

fn status_line(view: &PanelView) -> String<LINE_LEN> {
    let mut line: String<LINE_LEN> = String::new();
    let power = if view.dimmed { "PWR OFF" } else { "PWR ON" };
    match view.battery {
        Some(level) => {
            let _ = write!(line, "{:<12}BAT{:>4}%", power, level);
        }
        None => {
            let _ = line.push_str(power);
        }
    }
    line
}

fn indicator_flags(indicators: &Indicators) -> String<9> {
    let mut flags: String<9> = String::new();
    let marks = [
        (indicators.lock, 'L'),
        (indicators.kickback, 'K'),
        (indicators.battery, 'B'),
        (indicators.maintenance, 'M'),
        (indicators.nfc, 'N'),
    ];
    for (i, (tone, mark)) in marks.iter().enumerate() {
        if i > 0 {
            let _ = flags.push(' ');
        }
        let _ = flags.push(if tone.is_lit() { *mark } else { '.' });
    }
    flags
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
