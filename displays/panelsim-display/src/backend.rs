//! Display backend trait
//!
//! Defines the interface a text display implements to show a `Screen`.

use crate::screen::Screen;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering the panel screen.
/// Implementations may be a terminal, a test buffer or a character LCD.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert a region on the specified row (for the active control)
    ///
    /// - `row`: Row number
    /// - `start_col`: Starting column
    /// - `end_col`: Ending column (exclusive)
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

/// Draw a screen if it is dirty
///
/// Returns `Ok(true)` when the screen was drawn and marked clean, `Ok(false)`
/// when there was nothing to do. Rows beyond the backend's dimensions are
/// skipped.
pub fn present<B: DisplayBackend>(
    backend: &mut B,
    screen: &mut Screen,
) -> Result<bool, DisplayError> {
    if !screen.is_dirty() {
        return Ok(false);
    }
    if !backend.is_ready() {
        return Err(DisplayError::NotInitialized);
    }

    let (_, rows) = backend.dimensions();
    backend.clear()?;
    for (row, line) in screen.lines().enumerate().take(rows as usize) {
        if !line.is_empty() {
            backend.draw_text(row as u8, 0, line)?;
        }
        if let Some((start, end)) = screen.get_highlight(row) {
            backend.invert_region(row as u8, start, end)?;
        }
    }
    backend.flush()?;

    screen.mark_clean();
    Ok(true)
}
