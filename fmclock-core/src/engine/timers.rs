//! Shared countdown timers
//!
//! All three timers count tick periods. The foreground sees them through a
//! fixed scale of [`TIMER_SCALE`] ticks per unit.

use crate::display::BlinkPhase;

/// Ticks per foreground timer unit
pub const TIMER_SCALE: u16 = 4;

/// Blink cycle length in ticks
pub const BLINK_PERIOD: u16 = 2000;

/// Blink timer values below this are the "off" phase
pub const BLINK_OFF_THRESHOLD: u16 = 400;

/// Display timeout, blink and secondary countdowns
#[derive(Debug, Clone, Copy)]
pub struct SharedTimers {
    display: u16,
    blink: u16,
    secondary: u16,
}

impl SharedTimers {
    pub const fn new() -> Self {
        Self {
            display: 0,
            blink: BLINK_PERIOD,
            secondary: 0,
        }
    }

    /// Advance one tick
    pub fn tick(&mut self) {
        self.display = self.display.saturating_sub(1);
        self.secondary = self.secondary.saturating_sub(1);

        self.blink = self.blink.saturating_sub(1);
        if self.blink == 0 {
            self.blink = BLINK_PERIOD;
        }
    }

    /// Set the display timeout in foreground units
    pub fn set_display(&mut self, units: u16) {
        self.display = units.saturating_mul(TIMER_SCALE);
    }

    /// Remaining display timeout in foreground units
    pub fn display(&self) -> u16 {
        self.display / TIMER_SCALE
    }

    pub fn set_secondary(&mut self, units: u16) {
        self.secondary = units.saturating_mul(TIMER_SCALE);
    }

    pub fn secondary(&self) -> u16 {
        self.secondary / TIMER_SCALE
    }

    pub fn blink_phase(&self) -> BlinkPhase {
        if self.blink < BLINK_OFF_THRESHOLD {
            BlinkPhase::Off
        } else {
            BlinkPhase::On
        }
    }

    /// Raw blink countdown in ticks
    pub fn blink_ticks(&self) -> u16 {
        self.blink
    }
}

impl Default for SharedTimers {
    fn default() -> Self {
        Self::new()
    }
}
