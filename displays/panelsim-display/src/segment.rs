//! Two-digit 7-segment torque readout
//!
//! ```text
//!  AAAA
//! F    B
//! F    B
//!  GGGG
//! E    C
//! E    C
//!  DDDD
//! ```

use panelsim_core::state::TorqueSelection;

pub const SEG_A: u8 = 1 << 0;
pub const SEG_B: u8 = 1 << 1;
pub const SEG_C: u8 = 1 << 2;
pub const SEG_D: u8 = 1 << 3;
pub const SEG_E: u8 = 1 << 4;
pub const SEG_F: u8 = 1 << 5;
pub const SEG_G: u8 = 1 << 6;

/// Segment mask for a character; unsupported characters are blank
pub const fn glyph(c: char) -> u8 {
    match c {
        '0' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        '1' => SEG_B | SEG_C,
        '2' => SEG_A | SEG_B | SEG_G | SEG_E | SEG_D,
        '3' => SEG_A | SEG_B | SEG_G | SEG_C | SEG_D,
        '4' => SEG_F | SEG_G | SEG_B | SEG_C,
        '5' => SEG_A | SEG_F | SEG_G | SEG_C | SEG_D,
        '6' => SEG_A | SEG_F | SEG_G | SEG_E | SEG_D | SEG_C,
        '7' => SEG_A | SEG_B | SEG_C,
        '8' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '9' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
        // Level 0 (highest torque)
        'H' => SEG_F | SEG_E | SEG_G | SEG_B | SEG_C,
        // Custom level prefix
        'C' => SEG_A | SEG_F | SEG_E | SEG_D,
        _ => 0,
    }
}

fn digit(n: u8) -> char {
    char::from(b'0' + n % 10)
}

/// Characters shown for a selection
///
/// 0 reads `H `, 1-9 have a leading blank, custom levels read `C1`-`C3`.
pub fn readout(selection: TorqueSelection) -> [char; 2] {
    match selection {
        TorqueSelection::Numeric(0) => ['H', ' '],
        TorqueSelection::Numeric(n @ 1..=9) => [' ', digit(n)],
        TorqueSelection::Numeric(n @ 10..=99) => [digit(n / 10), digit(n)],
        TorqueSelection::Numeric(_) => [' ', ' '],
        TorqueSelection::Custom(key) => ['C', digit(key.index() as u8 + 1)],
    }
}

/// Segment masks for a selection, left digit first
pub fn readout_segments(selection: TorqueSelection) -> [u8; 2] {
    readout(selection).map(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelsim_core::state::CustomLevelKey;
    use TorqueSelection::{Custom, Numeric};

    #[test]
    fn test_readout() {
        assert_eq!(readout(Numeric(0)), ['H', ' ']);
        assert_eq!(readout(Numeric(7)), [' ', '7']);
        assert_eq!(readout(Numeric(10)), ['1', '0']);
        assert_eq!(readout(Numeric(99)), ['9', '9']);
        assert_eq!(readout(Numeric(120)), [' ', ' ']);
        assert_eq!(readout(Custom(CustomLevelKey::C3)), ['C', '3']);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(glyph('8'), 0x7F);
        assert_eq!(glyph(' '), 0);
        assert_eq!(glyph('x'), 0);
        assert_eq!(glyph('1'), SEG_B | SEG_C);
        // Every digit lights at least two segments
        for c in '0'..='9' {
            assert!(glyph(c).count_ones() >= 2);
        }
    }

    #[test]
    fn test_readout_segments() {
        assert_eq!(readout_segments(Numeric(0)), [glyph('H'), 0]);
        assert_eq!(
            readout_segments(Custom(CustomLevelKey::C1)),
            [glyph('C'), glyph('1')]
        );
    }
}
