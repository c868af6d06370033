//! Encoder tick accumulation and resolution scaling

/// Encoder resolution from the persisted settings
///
/// The magnitude is the number of decoder ticks per reported step; a
/// negative value inverts the direction. Zero selects raw mode, where the
/// encoder lines act as two extra buttons and every accumulated unit is
/// reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderResolution(pub i8);

impl EncoderResolution {
    /// Raw mode
    pub const RAW: Self = Self(0);

    pub fn is_raw(&self) -> bool {
        self.0 == 0
    }
}

impl Default for EncoderResolution {
    fn default() -> Self {
        Self(4)
    }
}

/// Signed tick accumulator
///
/// Filled from the tick handler, drained by the foreground.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickAccumulator(i16);

impl TickAccumulator {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add ticks, saturating symmetrically at ±`i16::MAX`
    pub fn add(&mut self, delta: i8) {
        self.0 = self
            .0
            .saturating_add(i16::from(delta))
            .clamp(-i16::MAX, i16::MAX);
    }

    pub fn value(&self) -> i16 {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Remove whole steps of `resolution` ticks and return them
    ///
    /// The remainder keeps the sign of the accumulator and stays pending
    /// for the next drain. Raw mode hands over everything.
    pub fn drain(&mut self, resolution: EncoderResolution) -> i16 {
        if resolution.is_raw() {
            return core::mem::take(&mut self.0);
        }

        let per_step = i16::from(resolution.0).abs();
        let steps = self.0 / per_step;
        self.0 %= per_step;

        if resolution.0 < 0 {
            -steps
        } else {
            steps
        }
    }
}
