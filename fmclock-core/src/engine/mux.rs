//! Display multiplexer and brightness
//!
//! One digit is powered per tick. The overflow half of the tick selects the
//! next digit and drives its segments; the compare half blanks every line
//! so digits never ghost into each other. The compare point sets how long
//! each digit is lit, which is the brightness.

use crate::display::{DisplayBuffer, DIGIT_COUNT};

/// Electrical level that turns a line on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

impl ActiveLevel {
    const fn invert_mask(self, all_lines: u8) -> u8 {
        match self {
            ActiveLevel::High => 0,
            ActiveLevel::Low => all_lines,
        }
    }
}

/// Mask of the eight segment lines
const SEGMENT_LINES: u8 = 0xFF;

/// Mask of the four digit lines
const DIGIT_LINES: u8 = (1 << DIGIT_COUNT) - 1;

/// Drive polarity of the segment and digit lines
///
/// Folded into XOR masks when constructed, so the tick path never branches
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrivePolarity {
    segment_invert: u8,
    digit_invert: u8,
}

impl DrivePolarity {
    /// Common-cathode display with segments sourced and digits sunk directly
    pub const COMMON_CATHODE: Self = Self::new(ActiveLevel::High, ActiveLevel::Low);

    /// Common-anode display with segments sunk and digits sourced directly
    pub const COMMON_ANODE: Self = Self::new(ActiveLevel::Low, ActiveLevel::High);

    /// Common-anode display with PNP digit drivers
    pub const COMMON_ANODE_PNP: Self = Self::new(ActiveLevel::Low, ActiveLevel::Low);

    pub const fn new(segments: ActiveLevel, digits: ActiveLevel) -> Self {
        Self {
            segment_invert: segments.invert_mask(SEGMENT_LINES),
            digit_invert: digits.invert_mask(DIGIT_LINES),
        }
    }

    /// Line levels for the given logical on/off patterns
    pub const fn levels(&self, digits_on: u8, segments_on: u8) -> LineLevels {
        LineLevels {
            digits: (digits_on & DIGIT_LINES) ^ self.digit_invert,
            segments: segments_on ^ self.segment_invert,
        }
    }
}

impl Default for DrivePolarity {
    fn default() -> Self {
        Self::COMMON_CATHODE
    }
}

/// Physical levels for every display line (bit set = drive high)
///
/// Bit `i` of `digits` is digit line `i`; bit `i` of `segments` is segment
/// `A + i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineLevels {
    pub digits: u8,
    pub segments: u8,
}

/// Digit time-slicer
#[derive(Debug, Clone, Copy)]
pub struct Multiplexer {
    polarity: DrivePolarity,
    position: usize,
}

impl Multiplexer {
    pub const fn new(polarity: DrivePolarity) -> Self {
        Self {
            polarity,
            // First overflow lights digit 0
            position: DIGIT_COUNT - 1,
        }
    }

    /// Overflow half: advance to the next digit and light it
    pub fn overflow(&mut self, buffer: &DisplayBuffer) -> LineLevels {
        self.position = (self.position + 1) % DIGIT_COUNT;
        self.polarity
            .levels(1 << self.position, buffer.digit(self.position))
    }

    /// Compare half: every line off
    pub fn compare(&self) -> LineLevels {
        self.blank()
    }

    /// Levels with every line off
    pub fn blank(&self) -> LineLevels {
        self.polarity.levels(0, 0)
    }

    /// Digit lit by the most recent overflow
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Highest brightness level
pub const BRIGHTNESS_MAX: u8 = 12;

/// Timer counts in one tick period
pub const TICK_PERIOD_COUNTS: u16 = 256;

/// Compare counts per brightness level
const COUNTS_PER_LEVEL: u8 = 21;

/// Display brightness (0..=[`BRIGHTNESS_MAX`])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    pub const MAX: Self = Self(BRIGHTNESS_MAX);

    /// Out-of-range levels are clamped to the maximum
    pub const fn new(level: u8) -> Self {
        if level > BRIGHTNESS_MAX {
            Self(BRIGHTNESS_MAX)
        } else {
            Self(level)
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Counts from the start of the tick until the compare blanking
    pub fn compare_value(&self) -> u8 {
        self.0 * COUNTS_PER_LEVEL
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}
