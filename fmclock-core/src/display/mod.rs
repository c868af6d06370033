//! Display content: segment encoding, the display buffer and mode rendering
//!
//! Index 0 of the buffer is the least significant (rightmost) digit.

pub mod modes;
pub mod segments;

use heapless::String;

use segments::{glyph, glyph_char, SEG_P};

/// Number of digits on the display
pub const DIGIT_COUNT: usize = 4;

/// Segment patterns for the four digits
///
/// Written whole by the foreground renderer, read by the multiplexer on
/// every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer([u8; DIGIT_COUNT]);

impl DisplayBuffer {
    /// All digits dark
    pub const BLANK: Self = Self([glyph::EMPTY; DIGIT_COUNT]);

    pub const fn new(digits: [u8; DIGIT_COUNT]) -> Self {
        Self(digits)
    }

    /// Segment pattern of one digit; out-of-range indices read as blank
    pub fn digit(&self, index: usize) -> u8 {
        self.0.get(index).copied().unwrap_or(glyph::EMPTY)
    }

    pub fn as_array(&self) -> &[u8; DIGIT_COUNT] {
        &self.0
    }

    /// Blank the digits in `range`, e.g. to flash a field being edited
    pub fn blank(&mut self, range: core::ops::Range<usize>) {
        let end = range.end.min(DIGIT_COUNT);
        let start = range.start.min(end);
        for digit in &mut self.0[start..end] {
            *digit = glyph::EMPTY;
        }
    }

    /// Human-readable rendering, most significant digit first
    ///
    /// Decimal points follow the digit they belong to, so `[3, 5|P, -, ' ']`
    /// reads `" -5.3"`. Meant for logs and tests.
    pub fn to_text(&self) -> String<8> {
        let mut text = String::new();
        for &segments in self.0.iter().rev() {
            // Capacity is 2 per digit, pushes cannot fail
            let _ = text.push(glyph_char(segments));
            if segments & SEG_P != 0 {
                let _ = text.push('.');
            }
        }
        text
    }
}

/// Phase of the free-running blink clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkPhase {
    /// Edited fields are visible
    On,
    /// Edited fields are blanked
    Off,
}

/// How the hour digits of the clock are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeFormat {
    /// Leading zeros suppressed ("9.05")
    #[default]
    Suppressed,
    /// Zero hour shown with leading zeros ("00.05")
    ZeroHour,
}

impl TimeFormat {
    pub fn from_zero_hour(zero_hour: bool) -> Self {
        if zero_hour {
            TimeFormat::ZeroHour
        } else {
            TimeFormat::Suppressed
        }
    }
}
