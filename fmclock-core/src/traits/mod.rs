//! Collaborator query traits
//!
//! The clock, tuner, volume control and thermometer are external to the
//! display engine. Rendering only needs to read from them, so each is
//! reduced to a narrow read-only query.

/// Wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

impl ClockTime {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self { hour, minute, second }
    }

    /// Hours and minutes packed as `HHMM` for a 4-digit display
    pub fn as_hhmm(&self) -> i16 {
        i16::from(self.hour) * 100 + i16::from(self.minute)
    }
}

/// Real-time clock
pub trait Clock {
    /// Current time of day
    fn now(&self) -> ClockTime;
}

/// FM tuner status
pub trait TunerStatus {
    /// Tuned frequency in 10 kHz units (10110 = 101.10 MHz)
    fn frequency(&self) -> u16;

    /// Whether a stereo signal is being received
    fn is_stereo(&self) -> bool;

    /// 1-based index of the tuned frequency in the stored station list,
    /// or 0 if it is not stored
    fn station_number(&self) -> u8;
}

/// Audio volume control
pub trait VolumeLevel {
    /// Current volume step
    fn volume(&self) -> i8;
}

/// Temperature sensor
pub trait Thermometer {
    /// Temperature in 0.1 °C units (235 = 23.5 °C)
    fn temperature_x10(&self) -> i16;
}

/// Everything the display-mode controller reads from
pub trait Appliance: Clock + TunerStatus + VolumeLevel + Thermometer {}

// Blanket implementation for anything providing all four queries
impl<T: Clock + TunerStatus + VolumeLevel + Thermometer> Appliance for T {}
