//! Display-mode controller
//!
//! Foreground logic that turns button commands and encoder steps into
//! display-mode changes and appliance actions, and keeps the display buffer
//! rendered for the current mode. Every mode except [`DisplayMode::Time`]
//! is held by the engine's display timeout and falls back to the clock
//! when it expires.

use crate::engine::{SharedEngine, BRIGHTNESS_MAX};
use crate::input::ButtonCommand;
use crate::traits::Appliance;

/// Foreground timer units per second (3906 Hz tick / 4)
pub const UNITS_PER_SECOND: u16 = 976;

/// How long a transient mode stays up without input
pub const VOLUME_TIMEOUT: u16 = 3 * UNITS_PER_SECOND;
pub const EDIT_TIMEOUT: u16 = 10 * UNITS_PER_SECOND;
pub const INFO_TIMEOUT: u16 = 5 * UNITS_PER_SECOND;

/// Interval between temperature display refreshes
pub const TEMPERATURE_REFRESH: u16 = UNITS_PER_SECOND;

/// What the display is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Time of day (idle mode)
    #[default]
    Time,
    /// Editing the hours
    EditHour,
    /// Editing the minutes
    EditMinute,
    /// Volume level
    Volume,
    /// Temperature reading
    Temperature,
    /// Tuned frequency with stereo indicator
    TunerFrequency,
    /// Tuning with the encoder
    TunerEdit,
    /// Stored station number
    Station,
}

impl DisplayMode {
    /// Timeout applied when entering or touching the mode
    pub fn timeout(&self) -> u16 {
        match self {
            DisplayMode::Time => 0,
            DisplayMode::EditHour | DisplayMode::EditMinute | DisplayMode::TunerEdit => EDIT_TIMEOUT,
            DisplayMode::Volume => VOLUME_TIMEOUT,
            DisplayMode::Temperature | DisplayMode::TunerFrequency | DisplayMode::Station => {
                INFO_TIMEOUT
            }
        }
    }
}

/// Action for the appliance behind the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiAction {
    /// Change the volume by this many steps
    AdjustVolume(i16),
    /// Change the clock hours by this many steps
    AdjustHour(i16),
    /// Change the clock minutes by this many steps
    AdjustMinute(i16),
    /// Retune by this many frequency-grid steps
    TuneBy(i16),
    /// Store the tuned frequency as a station, or delete it if stored
    ToggleStation,
    /// Move this many stored stations up (positive) or down the band
    NextStation(i16),
    /// Switch forced mono reception on or off
    ToggleMono,
    /// Toggle the zero-hour time format (persisted)
    ToggleZeroHour,
    /// Brightness changed to this level (persisted)
    BrightnessChanged(u8),
}

/// Radio records changed since they were last written
///
/// Volume and tuning change one encoder step at a time. Flash writes stall
/// the display tick, so these records are written once the display is idle
/// on the clock instead of on every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsavedRecords {
    pub volume: bool,
    pub tuner: bool,
}

impl UnsavedRecords {
    /// Record what an applied action changed
    pub fn note(&mut self, action: UiAction) {
        match action {
            UiAction::AdjustVolume(_) => self.volume = true,
            UiAction::TuneBy(_) | UiAction::NextStation(_) | UiAction::ToggleMono => {
                self.tuner = true
            }
            _ => {}
        }
    }

    /// Records due for writing in `mode`, clearing them
    pub fn take_due(&mut self, mode: DisplayMode) -> Self {
        if mode == DisplayMode::Time {
            core::mem::take(self)
        } else {
            Self::default()
        }
    }
}

/// Display-mode state machine
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeController {
    mode: DisplayMode,
}

impl ModeController {
    pub const fn new() -> Self {
        Self {
            mode: DisplayMode::Time,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    fn enter(&mut self, engine: &SharedEngine, mode: DisplayMode) {
        self.mode = mode;
        engine.set_display_timeout(mode.timeout());
        if mode == DisplayMode::Temperature {
            // Render on the next refresh
            engine.set_secondary_timer(0);
        }
    }

    /// Handle a debounced button command
    pub fn on_command(&mut self, engine: &SharedEngine, command: ButtonCommand) -> Option<UiAction> {
        use DisplayMode::*;

        match command {
            ButtonCommand::Btn1 => {
                let next = match self.mode {
                    EditHour => EditMinute,
                    EditMinute => Time,
                    _ => EditHour,
                };
                self.enter(engine, next);
                None
            }
            ButtonCommand::Btn1Long => {
                self.enter(engine, Time);
                Some(UiAction::ToggleZeroHour)
            }
            ButtonCommand::Btn2 => {
                self.enter(engine, Volume);
                None
            }
            ButtonCommand::Btn2Long => {
                let level = engine.brightness().level();
                let next = if level >= BRIGHTNESS_MAX { 0 } else { level + 1 };
                engine.set_brightness(next);
                Some(UiAction::BrightnessChanged(next))
            }
            ButtonCommand::Btn3 => {
                self.enter(engine, Temperature);
                None
            }
            ButtonCommand::Btn3Long => {
                self.enter(engine, Station);
                Some(UiAction::ToggleStation)
            }
            ButtonCommand::Btn4 => {
                let next = if self.mode == TunerFrequency { Station } else { TunerFrequency };
                self.enter(engine, next);
                None
            }
            ButtonCommand::Btn4Long => {
                if self.mode == TunerEdit {
                    engine.set_display_timeout(EDIT_TIMEOUT);
                    return Some(UiAction::ToggleMono);
                }
                self.enter(engine, TunerEdit);
                None
            }
        }
    }

    /// Handle encoder steps drained from the engine
    pub fn on_encoder(&mut self, engine: &SharedEngine, steps: i16) -> Option<UiAction> {
        use DisplayMode::*;

        if steps == 0 {
            return None;
        }

        let action = match self.mode {
            EditHour => UiAction::AdjustHour(steps),
            EditMinute => UiAction::AdjustMinute(steps),
            TunerEdit => UiAction::TuneBy(steps),
            Station => UiAction::NextStation(steps),
            _ => {
                self.mode = Volume;
                UiAction::AdjustVolume(steps)
            }
        };
        engine.set_display_timeout(self.mode.timeout());
        Some(action)
    }

    /// Fall back to the clock on timeout and render the current mode
    pub fn refresh(&mut self, engine: &SharedEngine, appliance: &impl Appliance) {
        if self.mode != DisplayMode::Time && engine.display_timeout() == 0 {
            self.mode = DisplayMode::Time;
        }

        match self.mode {
            DisplayMode::Time => engine.render_time(appliance),
            DisplayMode::EditHour => engine.render_time_edit_hour(appliance),
            DisplayMode::EditMinute => engine.render_time_edit_minute(appliance),
            DisplayMode::Volume => engine.render_volume(appliance),
            DisplayMode::Temperature => {
                if engine.secondary_timer() == 0 {
                    engine.render_temperature(appliance);
                    engine.set_secondary_timer(TEMPERATURE_REFRESH);
                }
            }
            DisplayMode::TunerFrequency => engine.render_tuner_frequency(appliance),
            DisplayMode::TunerEdit => engine.render_tuner_frequency_edit(appliance),
            DisplayMode::Station => engine.render_station_number(appliance),
        }
    }
}
