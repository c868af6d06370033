//! Mode renderers
//!
//! Each display mode is a thin wrapper around
//! [`render_number`](super::segments::render_number). They are pure: the
//! blink phase and time format are passed in by the engine.

use super::segments::{glyph, render_number};
use super::{BlinkPhase, DisplayBuffer, TimeFormat, DIGIT_COUNT};
use crate::traits::ClockTime;

/// Digits holding the minutes
const MINUTE_DIGITS: core::ops::Range<usize> = 0..2;

/// Digits holding the hours
const HOUR_DIGITS: core::ops::Range<usize> = 2..4;

/// Decimal-point position for the clock
///
/// The separator point blinks with the seconds. With the zero-hour format
/// the position is past the last digit so every digit is rendered.
fn time_dot_pos(time: &ClockTime, format: TimeFormat) -> u8 {
    let odd_second = time.second % 2 == 1;
    match (format, odd_second) {
        (TimeFormat::ZeroHour, false) => 8,
        (TimeFormat::ZeroHour, true) => 6,
        (TimeFormat::Suppressed, false) => 0,
        (TimeFormat::Suppressed, true) => 2,
    }
}

/// Time of day as `HH.MM`
pub fn time(time: &ClockTime, format: TimeFormat) -> DisplayBuffer {
    render_number(time.as_hhmm(), time_dot_pos(time, format), glyph::EMPTY, false)
}

/// Time of day with the hours flashing
pub fn time_edit_hour(time: &ClockTime, format: TimeFormat, phase: BlinkPhase) -> DisplayBuffer {
    let mut buffer = self::time(time, format);
    if phase == BlinkPhase::Off {
        buffer.blank(HOUR_DIGITS);
    }
    buffer
}

/// Time of day with the minutes flashing
pub fn time_edit_minute(time: &ClockTime, format: TimeFormat, phase: BlinkPhase) -> DisplayBuffer {
    let mut buffer = self::time(time, format);
    if phase == BlinkPhase::Off {
        buffer.blank(MINUTE_DIGITS);
    }
    buffer
}

/// Tuner frequency with 100 kHz resolution, stereo shown on the last point
pub fn tuner_frequency(frequency: u16, stereo: bool) -> DisplayBuffer {
    render_number(frequency_tenths(frequency), 1, glyph::EMPTY, stereo)
}

/// Tuner frequency flashing as a whole while it is edited
pub fn tuner_frequency_edit(frequency: u16, phase: BlinkPhase) -> DisplayBuffer {
    match phase {
        BlinkPhase::On => render_number(frequency_tenths(frequency), 1, glyph::EMPTY, false),
        BlinkPhase::Off => DisplayBuffer::BLANK,
    }
}

/// Stored station index with a `C` label, `C --` when not stored
pub fn station_number(station: u8) -> DisplayBuffer {
    if station == 0 {
        let mut digits = [glyph::EMPTY; DIGIT_COUNT];
        digits[0] = glyph::MINUS;
        digits[1] = glyph::MINUS;
        digits[DIGIT_COUNT - 1] = glyph::C;
        return DisplayBuffer::new(digits);
    }
    render_number(i16::from(station), 0, glyph::C, false)
}

/// Volume level with the volume label
pub fn volume(level: i8) -> DisplayBuffer {
    render_number(i16::from(level), 0, glyph::G, false)
}

/// Temperature in 0.1 °C
pub fn temperature(temperature_x10: i16) -> DisplayBuffer {
    render_number(temperature_x10, 1, glyph::EMPTY, false)
}

fn frequency_tenths(frequency: u16) -> i16 {
    // 10 kHz units down to 100 kHz; at most 6553 so the cast is lossless
    (frequency / 10) as i16
}
