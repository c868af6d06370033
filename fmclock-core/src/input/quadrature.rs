//! Quadrature encoder decoding

/// Phase of the two encoder lines (true = line active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Neither line active
    #[default]
    Idle,
    /// Only line A active
    A,
    /// Only line B active
    B,
    /// Both lines active
    AB,
}

impl Phase {
    pub fn from_lines(a: bool, b: bool) -> Self {
        match (a, b) {
            (false, false) => Phase::Idle,
            (true, false) => Phase::A,
            (false, true) => Phase::B,
            (true, true) => Phase::AB,
        }
    }
}

/// Single-step quadrature decoder
///
/// Only transitions between adjacent phases count. A transition that skips
/// a phase (contact bounce or a missed sample) is dropped without changing
/// the count.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadratureDecoder {
    previous: Phase,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self { previous: Phase::Idle }
    }

    /// Feed the current phase, returning the step it implies
    ///
    /// Forward rotation (Idle → A → AB → B → Idle) yields -1, backward
    /// rotation yields +1, anything else 0.
    pub fn update(&mut self, now: Phase) -> i8 {
        use Phase::*;

        let step = match (self.previous, now) {
            (Idle, A) | (A, AB) | (AB, B) | (B, Idle) => -1,
            (Idle, B) | (B, AB) | (AB, A) | (A, Idle) => 1,
            _ => 0,
        };
        self.previous = now;
        step
    }

    pub fn phase(&self) -> Phase {
        self.previous
    }
}
