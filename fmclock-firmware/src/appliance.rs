//! Appliance state behind the display
//!
//! Holds what the display modes read: the time of day, volume, tuned
//! frequency, stored stations and the latest temperature. Tuner ICs and the
//! audio path are not driven from here; their settings are tracked so the
//! display and controls behave the same with or without them fitted.

use embassy_time::Instant;

use fmclock_core::config::TunerParams;
use fmclock_core::stations::{StationList, StationToggle};
use fmclock_core::traits::{Clock, ClockTime, Thermometer, TunerStatus, VolumeLevel};

use crate::config::StoredRadio;

/// Volume range
pub const VOLUME_MIN: i8 = 0;
pub const VOLUME_MAX: i8 = 20;

/// FM band in 10 kHz units
pub const FREQ_MIN: u16 = 8750;
pub const FREQ_MAX: u16 = 10800;

/// Tuning grid step (100 kHz)
pub const FREQ_STEP: u16 = 10;

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Time of day kept as an offset from uptime
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock {
    offset_s: u32,
}

impl WallClock {
    pub const fn new() -> Self {
        Self { offset_s: 0 }
    }

    /// Time of day after `uptime_s` seconds of uptime
    pub fn time_at(&self, uptime_s: u64) -> ClockTime {
        let uptime_of_day = (uptime_s % u64::from(SECONDS_PER_DAY)) as u32;
        let seconds = (uptime_of_day + self.offset_s) % SECONDS_PER_DAY;

        ClockTime::new(
            (seconds / 3600) as u8,
            (seconds / 60 % 60) as u8,
            (seconds % 60) as u8,
        )
    }

    /// Move the hours, wrapping within the day
    pub fn adjust_hour(&mut self, steps: i16) {
        self.shift(i64::from(steps) * 3600);
    }

    /// Move the minutes, wrapping within the hour
    pub fn adjust_minute(&mut self, uptime_s: u64, steps: i16) {
        let minute = i64::from(self.time_at(uptime_s).minute);
        let target = (minute + i64::from(steps)).rem_euclid(60);
        self.shift((target - minute) * 60);
    }

    fn shift(&mut self, seconds: i64) {
        let day = i64::from(SECONDS_PER_DAY);
        self.offset_s = (i64::from(self.offset_s) + seconds).rem_euclid(day) as u32;
    }
}

/// Clock radio state
pub struct ClockRadio {
    clock: WallClock,
    volume: i8,
    frequency: u16,
    mono: bool,
    stations: StationList,
    temperature_x10: i16,
}

impl ClockRadio {
    /// Restore the radio from its persisted records
    pub fn new(stored: StoredRadio) -> Self {
        Self {
            clock: WallClock::new(),
            volume: stored.volume.clamp(VOLUME_MIN, VOLUME_MAX),
            frequency: stored.tuner.frequency.clamp(FREQ_MIN, FREQ_MAX),
            mono: stored.tuner.mono,
            stations: stored.stations,
            temperature_x10: 0,
        }
    }

    fn uptime_s() -> u64 {
        Instant::now().as_secs()
    }

    pub fn adjust_hour(&mut self, steps: i16) {
        self.clock.adjust_hour(steps);
    }

    pub fn adjust_minute(&mut self, steps: i16) {
        self.clock.adjust_minute(Self::uptime_s(), steps);
    }

    pub fn change_volume(&mut self, steps: i16) {
        let volume = i16::from(self.volume) + steps;
        self.volume = volume.clamp(i16::from(VOLUME_MIN), i16::from(VOLUME_MAX)) as i8;
    }

    /// Retune by whole grid steps, stopping at the band edges
    pub fn tune_by(&mut self, steps: i16) {
        let frequency = i32::from(self.frequency) + i32::from(steps) * i32::from(FREQ_STEP);
        self.frequency = frequency.clamp(i32::from(FREQ_MIN), i32::from(FREQ_MAX)) as u16;
    }

    /// Store the tuned frequency, or remove it if already stored
    pub fn toggle_station(&mut self) -> StationToggle {
        self.stations.toggle(self.frequency)
    }

    /// Tune to a neighbouring stored station
    ///
    /// Returns false when there is none in that direction.
    pub fn step_station(&mut self, steps: i16) -> bool {
        match self.stations.step_from(self.frequency, steps) {
            Some(frequency) => {
                self.frequency = frequency;
                true
            }
            None => false,
        }
    }

    pub fn toggle_mono(&mut self) {
        self.mono = !self.mono;
    }

    pub fn set_temperature(&mut self, temperature_x10: i16) {
        self.temperature_x10 = temperature_x10;
    }

    pub fn tuner_params(&self) -> TunerParams {
        TunerParams {
            frequency: self.frequency,
            mono: self.mono,
        }
    }

    pub fn stations(&self) -> &StationList {
        &self.stations
    }
}

impl Clock for ClockRadio {
    fn now(&self) -> ClockTime {
        self.clock.time_at(Self::uptime_s())
    }
}

impl TunerStatus for ClockRadio {
    fn frequency(&self) -> u16 {
        self.frequency
    }

    fn is_stereo(&self) -> bool {
        // No tuner IC reporting pilot detection
        false
    }

    fn station_number(&self) -> u8 {
        self.stations.number(self.frequency)
    }
}

impl VolumeLevel for ClockRadio {
    fn volume(&self) -> i8 {
        self.volume
    }
}

impl Thermometer for ClockRadio {
    fn temperature_x10(&self) -> i16 {
        self.temperature_x10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_follows_uptime() {
        let clock = WallClock::new();
        assert_eq!(clock.time_at(0), ClockTime::new(0, 0, 0));
        assert_eq!(clock.time_at(3_723), ClockTime::new(1, 2, 3));
        assert_eq!(clock.time_at(u64::from(SECONDS_PER_DAY) + 59), ClockTime::new(0, 0, 59));
    }

    #[test]
    fn test_adjust_hour_wraps_day() {
        let mut clock = WallClock::new();
        clock.adjust_hour(-1);
        assert_eq!(clock.time_at(60), ClockTime::new(23, 1, 0));
        clock.adjust_hour(25);
        assert_eq!(clock.time_at(60), ClockTime::new(0, 1, 0));
    }

    #[test]
    fn test_adjust_minute_keeps_hour() {
        let mut clock = WallClock::new();
        clock.adjust_hour(5);

        // 05:58 + 3 minutes wraps to 05:01
        clock.adjust_minute(0, 58);
        assert_eq!(clock.time_at(0), ClockTime::new(5, 58, 0));
        clock.adjust_minute(0, 3);
        assert_eq!(clock.time_at(0), ClockTime::new(5, 1, 0));

        clock.adjust_minute(0, -2);
        assert_eq!(clock.time_at(0), ClockTime::new(5, 59, 0));
    }
}
