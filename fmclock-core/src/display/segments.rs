//! Seven-segment glyphs and number rendering
//!
//! Segment bit order is A, B, C, D, E, F, G, P (bit 0 = A, bit 7 = the
//! decimal point).

use super::{DisplayBuffer, DIGIT_COUNT};

pub const SEG_A: u8 = 1 << 0;
pub const SEG_B: u8 = 1 << 1;
pub const SEG_C: u8 = 1 << 2;
pub const SEG_D: u8 = 1 << 3;
pub const SEG_E: u8 = 1 << 4;
pub const SEG_F: u8 = 1 << 5;
pub const SEG_G: u8 = 1 << 6;
/// Decimal point
pub const SEG_P: u8 = 1 << 7;

/// Named glyphs
pub mod glyph {
    use super::*;

    pub const EMPTY: u8 = 0;
    pub const MINUS: u8 = SEG_G;
    pub const C: u8 = SEG_A | SEG_D | SEG_E | SEG_F;
    pub const E: u8 = SEG_A | SEG_D | SEG_E | SEG_F | SEG_G;
    /// Used as the volume label
    pub const G: u8 = SEG_A | SEG_C | SEG_D | SEG_E | SEG_F;
    pub const R: u8 = SEG_E | SEG_G;
}

/// Glyphs for the decimal digits 0-9
pub const DIGIT_GLYPHS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
    SEG_B | SEG_C | SEG_F | SEG_G,
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
];

/// Largest value [`render_number`] can show
pub const MAX_RENDERABLE: i16 = 9999;

/// Smallest value [`render_number`] can show (three digits plus the sign)
pub const MIN_RENDERABLE: i16 = -999;

/// Render a signed number into a display buffer
///
/// Digits are written right to left starting at index 0.
///
/// - `dot_pos`: digit index (mod 4) that gets the decimal point; index 0
///   never does. Zero digits are rendered up to index `dot_pos` even when the
///   remaining magnitude is zero, so a `dot_pos` of 3 or more gives leading
///   zeros on every digit.
/// - `label`: glyph ORed into the most significant digit.
/// - `leading_indicator`: lights the point of digit 0.
///
/// A negative value gets a minus (segment G) on the first digit past its
/// magnitude. Values outside [`MIN_RENDERABLE`]..=[`MAX_RENDERABLE`] are
/// clamped.
pub fn render_number(value: i16, dot_pos: u8, label: u8, leading_indicator: bool) -> DisplayBuffer {
    let value = value.clamp(MIN_RENDERABLE, MAX_RENDERABLE);
    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();

    // The sign needs a free digit of its own
    let digit_slots = if negative { DIGIT_COUNT - 1 } else { DIGIT_COUNT };
    let dot_index = usize::from(dot_pos) % DIGIT_COUNT;
    let zero_fill = usize::from(dot_pos);

    let mut digits = [glyph::EMPTY; DIGIT_COUNT];
    if leading_indicator {
        digits[0] = SEG_P;
    }

    let mut index = 0;
    while index < digit_slots {
        if magnitude == 0 && index > zero_fill {
            break;
        }
        digits[index] |= DIGIT_GLYPHS[usize::from(magnitude % 10)];
        if index == dot_index && index != 0 {
            digits[index] |= SEG_P;
        }
        magnitude /= 10;
        index += 1;
    }

    if negative {
        digits[index] |= glyph::MINUS;
    }

    digits[DIGIT_COUNT - 1] |= label;

    DisplayBuffer::new(digits)
}

/// Character shown by a glyph, ignoring the decimal point
pub fn glyph_char(segments: u8) -> char {
    let segments = segments & !SEG_P;
    if let Some(digit) = DIGIT_GLYPHS.iter().position(|&g| g == segments) {
        return char::from(b'0' + digit as u8);
    }
    match segments {
        glyph::EMPTY => ' ',
        glyph::MINUS => '-',
        glyph::C => 'C',
        glyph::E => 'E',
        glyph::G => 'G',
        glyph::R => 'r',
        _ => '?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Decode a rendered buffer back into (negative, magnitude, digit count)
    fn decode(buffer: &DisplayBuffer) -> (bool, u32, usize) {
        let mut negative = false;
        let mut magnitude = 0u32;
        let mut digits = 0;
        for index in (0..DIGIT_COUNT).rev() {
            let segments = buffer.digit(index) & !SEG_P;
            if let Some(d) = DIGIT_GLYPHS.iter().position(|&g| g == segments) {
                magnitude = magnitude * 10 + d as u32;
                digits += 1;
            } else if segments == glyph::MINUS {
                negative = true;
            }
        }
        (negative, magnitude, digits)
    }

    #[test]
    fn test_plain_number() {
        let buffer = render_number(1234, 0, glyph::EMPTY, false);
        assert_eq!(buffer.as_array(), &[DIGIT_GLYPHS[4], DIGIT_GLYPHS[3], DIGIT_GLYPHS[2], DIGIT_GLYPHS[1]]);
    }

    #[test]
    fn test_leading_zeros_suppressed() {
        let buffer = render_number(7, 0, glyph::EMPTY, false);
        assert_eq!(buffer.as_array(), &[DIGIT_GLYPHS[7], 0, 0, 0]);
    }

    #[test]
    fn test_zero_renders_one_digit() {
        let buffer = render_number(0, 0, glyph::EMPTY, false);
        assert_eq!(buffer.as_array(), &[DIGIT_GLYPHS[0], 0, 0, 0]);
    }

    #[test]
    fn test_dot_position_forces_zero_fill() {
        // Temperature style: 0.5
        let buffer = render_number(5, 1, glyph::EMPTY, false);
        assert_eq!(buffer.as_array(), &[DIGIT_GLYPHS[5], DIGIT_GLYPHS[0] | SEG_P, 0, 0]);
    }

    #[test]
    fn test_dot_beyond_display_fills_all_digits() {
        // Zero-hour clock at 00:05 with dot_pos 8: all digits, no point
        let buffer = render_number(5, 8, glyph::EMPTY, false);
        assert_eq!(
            buffer.as_array(),
            &[DIGIT_GLYPHS[5], DIGIT_GLYPHS[0], DIGIT_GLYPHS[0], DIGIT_GLYPHS[0]]
        );
    }

    #[test]
    fn test_negative_sign_after_magnitude() {
        let buffer = render_number(-53, 1, glyph::EMPTY, false);
        assert_eq!(
            buffer.as_array(),
            &[DIGIT_GLYPHS[3], DIGIT_GLYPHS[5] | SEG_P, glyph::MINUS, 0]
        );
        assert_eq!(buffer.to_text().as_str(), " -5.3");
    }

    #[test]
    fn test_negative_with_full_zero_fill_keeps_sign() {
        let buffer = render_number(-5, 3, glyph::EMPTY, false);
        assert_eq!(buffer.digit(3), glyph::MINUS);
        assert_eq!(decode(&buffer), (true, 5, 3));
    }

    #[test]
    fn test_label_and_indicator() {
        let buffer = render_number(12, 0, glyph::C, true);
        assert_eq!(buffer.digit(0), DIGIT_GLYPHS[2] | SEG_P);
        assert_eq!(buffer.digit(3), glyph::C);
        assert_eq!(buffer.to_text().as_str(), "C 12.");
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(render_number(12345, 0, 0, false), render_number(9999, 0, 0, false));
        assert_eq!(render_number(i16::MIN, 0, 0, false), render_number(-999, 0, 0, false));
    }

    #[test]
    fn test_glyph_char() {
        assert_eq!(glyph_char(DIGIT_GLYPHS[8] | SEG_P), '8');
        assert_eq!(glyph_char(glyph::MINUS), '-');
        assert_eq!(glyph_char(glyph::G), 'G');
        assert_eq!(glyph_char(SEG_A | SEG_E), '?');
    }

    proptest! {
        #[test]
        fn prop_rendered_digits_match_value(value in MIN_RENDERABLE..=MAX_RENDERABLE, dot_pos in 0u8..16) {
            let buffer = render_number(value, dot_pos, glyph::EMPTY, false);
            let (negative, magnitude, digits) = decode(&buffer);

            prop_assert!(digits <= DIGIT_COUNT);
            prop_assert_eq!(magnitude, u32::from(value.unsigned_abs()));
            prop_assert_eq!(negative, value < 0);
        }

        #[test]
        fn prop_dot_only_on_requested_digit(value in 0i16..=MAX_RENDERABLE, dot_pos in 0u8..4) {
            let buffer = render_number(value, dot_pos, glyph::EMPTY, false);
            for index in 0..DIGIT_COUNT {
                let has_dot = buffer.digit(index) & SEG_P != 0;
                prop_assert_eq!(has_dot, index != 0 && index == usize::from(dot_pos));
            }
        }
    }
}
