//! GPIO wrappers and line groups
//!
//! Wraps `embassy_rp` pins in the `fmclock-hal` traits and groups them into
//! the display drive lines and the front-panel input lines.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;

use fmclock_core::engine::{InputSample, LineLevels};
use fmclock_core::input::ButtonMask;
use fmclock_hal::gpio::{InputPin, OutputBank, OutputPin};

/// Push-pull output
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    pub fn new(pin: Peri<'d, AnyPin>, initial: Level) -> Self {
        Self(Output::new(pin, initial))
    }
}

impl OutputPin for RpOutput<'_> {
    #[inline]
    fn set_high(&mut self) {
        self.0.set_high();
    }

    #[inline]
    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Input with the internal pull-up enabled
///
/// Buttons and encoder contacts switch to ground, so a pressed contact reads
/// low.
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    pub fn pull_up(pin: Peri<'d, AnyPin>) -> Self {
        Self(Input::new(pin, Pull::Up))
    }
}

impl InputPin for RpInput<'_> {
    #[inline]
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Number of segment lines (A..G and the decimal point)
pub const SEGMENT_LINE_COUNT: usize = 8;

/// Number of digit-select lines
pub const DIGIT_LINE_COUNT: usize = 4;

/// Display drive lines
pub struct DisplayLines<'d> {
    segments: OutputBank<RpOutput<'d>, SEGMENT_LINE_COUNT>,
    digits: OutputBank<RpOutput<'d>, DIGIT_LINE_COUNT>,
}

impl<'d> DisplayLines<'d> {
    pub fn new(
        segments: [RpOutput<'d>; SEGMENT_LINE_COUNT],
        digits: [RpOutput<'d>; DIGIT_LINE_COUNT],
    ) -> Self {
        Self {
            segments: OutputBank::new(segments),
            digits: OutputBank::new(digits),
        }
    }

    /// Drive all display lines
    ///
    /// Segments are written before the digit lines. Every overflow follows a
    /// compare that turned all lines off, so the new pattern is in place
    /// before its digit is selected.
    #[inline]
    pub fn write(&mut self, levels: LineLevels) {
        self.segments.write(levels.segments);
        self.digits.write(levels.digits);
    }

    /// Levels currently driven
    pub fn levels(&self) -> LineLevels {
        LineLevels {
            digits: self.digits.levels(),
            segments: self.segments.levels(),
        }
    }
}

/// Number of front-panel buttons
pub const BUTTON_COUNT: usize = 4;

/// Front-panel buttons and encoder contacts
pub struct InputLines<'d> {
    buttons: [RpInput<'d>; BUTTON_COUNT],
    encoder_a: RpInput<'d>,
    encoder_b: RpInput<'d>,
}

impl<'d> InputLines<'d> {
    pub fn new(
        buttons: [RpInput<'d>; BUTTON_COUNT],
        encoder_a: RpInput<'d>,
        encoder_b: RpInput<'d>,
    ) -> Self {
        Self {
            buttons,
            encoder_a,
            encoder_b,
        }
    }

    /// Sample every input line (active low)
    #[inline]
    pub fn sample(&self) -> InputSample {
        let mut buttons = ButtonMask::NONE;
        for (bit, button) in self.buttons.iter().enumerate() {
            if button.is_low() {
                buttons = buttons.union(ButtonMask(1 << bit));
            }
        }

        InputSample {
            buttons,
            encoder_a: self.encoder_a.is_low(),
            encoder_b: self.encoder_b.is_low(),
        }
    }
}
