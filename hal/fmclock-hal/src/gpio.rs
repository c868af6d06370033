//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs, plus [`OutputBank`] for driving a group of lines
//! from a single bitmask.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// A fixed group of output lines driven from one bitmask
///
/// Bit `i` of the mask drives line `i`; a set bit drives the line high.
/// Used for the segment lines (8 lines, A..G plus the decimal point) and the
/// digit-select lines (4 lines) of the display.
pub struct OutputBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> OutputBank<P, N> {
    /// Create a bank from its pins, ordered by bit index
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Drive every line from the corresponding bit of `levels`
    ///
    /// Bits beyond `N` are ignored.
    #[inline]
    pub fn write(&mut self, levels: u8) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            pin.set_state(levels & (1 << bit) != 0);
        }
    }

    /// Read back the levels currently driven, as a bitmask
    pub fn levels(&self) -> u8 {
        self.pins
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.is_set_high())
            .fold(0, |acc, (bit, _)| acc | (1 << bit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakePin {
        high: bool,
        writes: u32,
    }

    impl OutputPin for FakePin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_bank_writes_each_bit() {
        let mut bank: OutputBank<FakePin, 8> = OutputBank::new(Default::default());

        bank.write(0b1010_0101);
        assert_eq!(bank.levels(), 0b1010_0101);

        bank.write(0);
        assert_eq!(bank.levels(), 0);
        assert!(bank.pins.iter().all(|pin| pin.writes == 2));
    }

    #[test]
    fn test_bank_ignores_high_bits() {
        let mut bank: OutputBank<FakePin, 4> = OutputBank::new(Default::default());

        bank.write(0b1111_0010);
        assert_eq!(bank.levels(), 0b0010);
    }

    #[test]
    fn test_set_state_default() {
        let mut pin = FakePin::default();
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(pin.is_set_low());
    }
}
