//! Display multiplexing and input decoding engine
//!
//! The periodic tick and the foreground share one engine state behind a
//! critical-section mutex. [`SharedEngine`] is the only way in: the tick
//! context calls [`SharedEngine::on_overflow`] and
//! [`SharedEngine::on_compare`], the foreground renders into the display
//! buffer and drains encoder steps and button commands.
//!
//! The tick runs to completion inside a single critical section, so the
//! foreground never sees a half-updated accumulator, timer or buffer.

pub mod mux;
pub mod timers;

use core::cell::RefCell;

use critical_section::Mutex;

use crate::config::EngineSettings;
use crate::display::segments::render_number;
use crate::display::{modes, BlinkPhase, DisplayBuffer, TimeFormat};
use crate::input::{
    ButtonCommand, ButtonMask, CommandMailbox, DebounceConfig, DebounceEvent, Debouncer,
    EncoderResolution, Phase, QuadratureDecoder, TickAccumulator,
};
use crate::traits::{Clock, Thermometer, TunerStatus, VolumeLevel};

pub use mux::{ActiveLevel, Brightness, DrivePolarity, LineLevels, Multiplexer, BRIGHTNESS_MAX};
pub use timers::SharedTimers;

/// Input lines sampled at the start of a tick (true = active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    /// Front-panel buttons, [`ButtonMask::BTN_1`]..[`ButtonMask::BTN_4`]
    pub buttons: ButtonMask,
    pub encoder_a: bool,
    pub encoder_b: bool,
}

/// Board-level engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    pub polarity: DrivePolarity,
    pub debounce: DebounceConfig,
}

impl EngineConfig {
    pub const DEFAULT: Self = Self {
        polarity: DrivePolarity::COMMON_CATHODE,
        debounce: DebounceConfig::DEFAULT,
    };
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// State touched by the tick handler
struct Engine {
    mux: Multiplexer,
    buffer: DisplayBuffer,
    brightness: Brightness,
    decoder: QuadratureDecoder,
    debouncer: Debouncer,
    accumulator: TickAccumulator,
    resolution: EncoderResolution,
    timers: SharedTimers,
    time_format: TimeFormat,
}

impl Engine {
    const fn new(config: EngineConfig) -> Self {
        Self {
            mux: Multiplexer::new(config.polarity),
            buffer: DisplayBuffer::BLANK,
            brightness: Brightness::MAX,
            decoder: QuadratureDecoder::new(),
            debouncer: Debouncer::new(config.debounce),
            accumulator: TickAccumulator::new(),
            resolution: EncoderResolution(4),
            timers: SharedTimers::new(),
            time_format: TimeFormat::Suppressed,
        }
    }

    /// Overflow half of the tick
    ///
    /// Returns the line levels for the newly lit digit and a button command
    /// to post, if one completed.
    fn overflow(&mut self, sample: InputSample) -> (LineLevels, Option<ButtonCommand>) {
        let levels = self.mux.overflow(&self.buffer);

        let mut mask = ButtonMask(sample.buttons.0 & ButtonMask::BUTTONS.0);
        if self.resolution.is_raw() {
            if sample.encoder_a {
                mask = mask.union(ButtonMask::ENC_A);
            }
            if sample.encoder_b {
                mask = mask.union(ButtonMask::ENC_B);
            }
        } else {
            let step = self
                .decoder
                .update(Phase::from_lines(sample.encoder_a, sample.encoder_b));
            self.accumulator.add(step);
        }

        let command = match self.debouncer.update(mask) {
            Some(DebounceEvent::Command(command)) => Some(command),
            Some(DebounceEvent::EncoderStep(step)) => {
                self.accumulator.add(step);
                None
            }
            None => None,
        };

        self.timers.tick();

        (levels, command)
    }
}

/// Engine state shared between the tick and the foreground
///
/// Meant to live in a `static`:
///
/// ```ignore
/// static ENGINE: SharedEngine = SharedEngine::new(EngineConfig::DEFAULT);
/// ```
pub struct SharedEngine {
    engine: Mutex<RefCell<Engine>>,
    mailbox: CommandMailbox,
}

impl SharedEngine {
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            engine: Mutex::new(RefCell::new(Engine::new(config))),
            mailbox: CommandMailbox::new(),
        }
    }

    /// Apply persisted settings and clear pending input
    pub fn init(&self, settings: &EngineSettings) {
        self.with(|engine| {
            engine.resolution = settings.resolution();
            engine.time_format = settings.time_format();
            engine.brightness = settings.brightness();
            engine.accumulator.reset();
            engine.decoder = QuadratureDecoder::new();
        });
        self.mailbox.clear();
    }

    fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        critical_section::with(|cs| {
            let mut engine = self.engine.borrow_ref_mut(cs);
            f(&mut *engine)
        })
    }

    // --- Tick context ---

    /// Overflow half of the periodic tick
    ///
    /// Lights the next digit, decodes the encoder, debounces the buttons and
    /// advances the timers.
    pub fn on_overflow(&self, sample: InputSample) -> LineLevels {
        let (levels, command) = self.with(|engine| engine.overflow(sample));
        if let Some(command) = command {
            self.mailbox.post(command);
        }
        levels
    }

    /// Compare half of the periodic tick: all display lines off
    pub fn on_compare(&self) -> LineLevels {
        self.with(|engine| engine.mux.compare())
    }

    /// Lines-off levels, for bring-up before the first tick
    pub fn blank_levels(&self) -> LineLevels {
        self.with(|engine| engine.mux.blank())
    }

    // --- Rendering ---

    fn show(&self, buffer: DisplayBuffer) {
        self.with(|engine| engine.buffer = buffer);
    }

    fn blink_and_format(&self) -> (BlinkPhase, TimeFormat) {
        self.with(|engine| (engine.timers.blink_phase(), engine.time_format))
    }

    /// Render a number with explicit layout
    pub fn render_number(&self, value: i16, dot_pos: u8, label: u8, leading_indicator: bool) {
        self.show(render_number(value, dot_pos, label, leading_indicator));
    }

    pub fn render_time(&self, clock: &impl Clock) {
        let now = clock.now();
        let (_, format) = self.blink_and_format();
        self.show(modes::time(&now, format));
    }

    pub fn render_time_edit_hour(&self, clock: &impl Clock) {
        let now = clock.now();
        let (phase, format) = self.blink_and_format();
        self.show(modes::time_edit_hour(&now, format, phase));
    }

    pub fn render_time_edit_minute(&self, clock: &impl Clock) {
        let now = clock.now();
        let (phase, format) = self.blink_and_format();
        self.show(modes::time_edit_minute(&now, format, phase));
    }

    pub fn render_tuner_frequency(&self, tuner: &impl TunerStatus) {
        self.show(modes::tuner_frequency(tuner.frequency(), tuner.is_stereo()));
    }

    pub fn render_tuner_frequency_edit(&self, tuner: &impl TunerStatus) {
        let frequency = tuner.frequency();
        let (phase, _) = self.blink_and_format();
        self.show(modes::tuner_frequency_edit(frequency, phase));
    }

    pub fn render_station_number(&self, tuner: &impl TunerStatus) {
        self.show(modes::station_number(tuner.station_number()));
    }

    pub fn render_volume(&self, volume: &impl VolumeLevel) {
        self.show(modes::volume(volume.volume()));
    }

    pub fn render_temperature(&self, thermometer: &impl Thermometer) {
        self.show(modes::temperature(thermometer.temperature_x10()));
    }

    /// Switch the time format without touching pending input
    pub fn set_time_format(&self, format: TimeFormat) {
        self.with(|engine| engine.time_format = format);
    }

    pub fn time_format(&self) -> TimeFormat {
        self.with(|engine| engine.time_format)
    }

    /// Copy of the display buffer
    pub fn display_snapshot(&self) -> DisplayBuffer {
        self.with(|engine| engine.buffer)
    }

    // --- Input ---

    /// Whole encoder steps since the last poll
    pub fn poll_encoder(&self) -> i16 {
        self.with(|engine| {
            let resolution = engine.resolution;
            engine.accumulator.drain(resolution)
        })
    }

    /// Pending button command, cleared by the read
    pub fn poll_button_command(&self) -> Option<ButtonCommand> {
        self.mailbox.take()
    }

    // --- Timers ---

    /// Set the display-mode timeout; 0 cancels the pending mode
    pub fn set_display_timeout(&self, units: u16) {
        self.with(|engine| engine.timers.set_display(units));
    }

    pub fn display_timeout(&self) -> u16 {
        self.with(|engine| engine.timers.display())
    }

    pub fn set_secondary_timer(&self, units: u16) {
        self.with(|engine| engine.timers.set_secondary(units));
    }

    pub fn secondary_timer(&self) -> u16 {
        self.with(|engine| engine.timers.secondary())
    }

    pub fn blink_phase(&self) -> BlinkPhase {
        self.with(|engine| engine.timers.blink_phase())
    }

    // --- Brightness ---

    /// Set the brightness level; out-of-range levels are clamped
    pub fn set_brightness(&self, level: u8) {
        self.with(|engine| engine.brightness = Brightness::new(level));
    }

    pub fn brightness(&self) -> Brightness {
        self.with(|engine| engine.brightness)
    }

    /// Timer counts into the tick at which the compare half runs
    pub fn brightness_compare(&self) -> u8 {
        self.with(|engine| engine.brightness.compare_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::segments::glyph;
    use crate::traits::ClockTime;

    const FORWARD: [(bool, bool); 4] = [(true, false), (true, true), (false, true), (false, false)];

    fn engine_with(settings: EngineSettings) -> SharedEngine {
        let engine = SharedEngine::new(EngineConfig::DEFAULT);
        engine.init(&settings);
        engine
    }

    fn raw_settings() -> EngineSettings {
        EngineSettings {
            encoder_resolution: 0,
            ..EngineSettings::default()
        }
    }

    fn tick(engine: &SharedEngine, sample: InputSample) -> LineLevels {
        let levels = engine.on_overflow(sample);
        engine.on_compare();
        levels
    }

    fn encoder(a: bool, b: bool) -> InputSample {
        InputSample {
            buttons: ButtonMask::NONE,
            encoder_a: a,
            encoder_b: b,
        }
    }

    fn buttons(mask: ButtonMask) -> InputSample {
        InputSample {
            buttons: mask,
            ..InputSample::default()
        }
    }

    fn hold(engine: &SharedEngine, sample: InputSample, ticks: u16) {
        for _ in 0..=ticks {
            tick(engine, sample);
        }
        tick(engine, InputSample::default());
    }

    struct FixedClock(ClockTime);

    impl Clock for FixedClock {
        fn now(&self) -> ClockTime {
            self.0
        }
    }

    #[test]
    fn test_encoder_rotation_to_steps() {
        let engine = engine_with(EngineSettings::default());

        for _ in 0..2 {
            for &(a, b) in &FORWARD {
                tick(&engine, encoder(a, b));
            }
        }
        // 8 forward ticks at 4 per step
        assert_eq!(engine.poll_encoder(), -2);
        assert_eq!(engine.poll_encoder(), 0);
    }

    #[test]
    fn test_partial_step_kept() {
        let engine = engine_with(EngineSettings::default());

        for &(a, b) in FORWARD.iter().rev().skip(1) {
            // B, AB, A: three backward ticks
            tick(&engine, encoder(a, b));
        }
        assert_eq!(engine.poll_encoder(), 0);

        tick(&engine, encoder(false, false));
        assert_eq!(engine.poll_encoder(), 1);
    }

    #[test]
    fn test_encoder_ignored_in_raw_mode_rotation() {
        let engine = engine_with(raw_settings());
        for &(a, b) in &FORWARD {
            tick(&engine, encoder(a, b));
        }
        assert_eq!(engine.poll_encoder(), 0);
    }

    #[test]
    fn test_raw_mode_encoder_buttons() {
        let engine = engine_with(raw_settings());

        hold(&engine, encoder(true, false), 200);
        hold(&engine, encoder(true, false), 200);
        hold(&engine, encoder(false, true), 200);

        assert_eq!(engine.poll_encoder(), 1);
        assert_eq!(engine.poll_button_command(), None);
    }

    #[test]
    fn test_button_command_through_mailbox() {
        let engine = engine_with(EngineSettings::default());

        hold(&engine, buttons(ButtonMask::BTN_2), 150);
        assert_eq!(engine.poll_button_command(), Some(ButtonCommand::Btn2));
        assert_eq!(engine.poll_button_command(), None);

        hold(&engine, buttons(ButtonMask::BTN_1), 2000);
        assert_eq!(engine.poll_button_command(), Some(ButtonCommand::Btn1Long));
    }

    #[test]
    fn test_unpolled_command_is_overwritten() {
        let engine = engine_with(EngineSettings::default());

        hold(&engine, buttons(ButtonMask::BTN_1), 150);
        hold(&engine, buttons(ButtonMask::BTN_3), 150);

        assert_eq!(engine.poll_button_command(), Some(ButtonCommand::Btn3));
        assert_eq!(engine.poll_button_command(), None);
    }

    #[test]
    fn test_encoder_lines_masked_from_buttons() {
        let engine = engine_with(EngineSettings::default());
        let sample = InputSample {
            buttons: ButtonMask(0xF0 | ButtonMask::BTN_4.0),
            ..InputSample::default()
        };
        hold(&engine, sample, 150);
        assert_eq!(engine.poll_button_command(), Some(ButtonCommand::Btn4));
    }

    #[test]
    fn test_mux_shows_buffer_and_blanks() {
        let engine = SharedEngine::new(EngineConfig {
            polarity: DrivePolarity::new(ActiveLevel::High, ActiveLevel::High),
            ..EngineConfig::DEFAULT
        });
        engine.render_number(1234, 0, glyph::EMPTY, false);
        let buffer = engine.display_snapshot();

        for digit in 0..4 {
            let levels = engine.on_overflow(InputSample::default());
            assert_eq!(levels.digits, 1 << digit);
            assert_eq!(levels.segments, buffer.digit(digit));
            assert_eq!(engine.on_compare(), LineLevels { digits: 0, segments: 0 });
        }
    }

    #[test]
    fn test_timeout_counts_down_with_ticks() {
        let engine = engine_with(EngineSettings::default());
        engine.set_display_timeout(2);
        assert_eq!(engine.display_timeout(), 2);

        for _ in 0..8 {
            tick(&engine, InputSample::default());
        }
        assert_eq!(engine.display_timeout(), 0);

        engine.set_secondary_timer(5);
        engine.set_secondary_timer(0);
        assert_eq!(engine.secondary_timer(), 0);
    }

    #[test]
    fn test_brightness() {
        let engine = engine_with(EngineSettings {
            brightness: 3,
            ..EngineSettings::default()
        });
        assert_eq!(engine.brightness_compare(), 63);

        engine.set_brightness(50);
        assert_eq!(engine.brightness().level(), BRIGHTNESS_MAX);
    }

    #[test]
    fn test_time_edit_follows_blink() {
        let engine = engine_with(EngineSettings::default());
        let clock = FixedClock(ClockTime::new(12, 34, 0));

        engine.render_time_edit_hour(&clock);
        assert_eq!(engine.display_snapshot().to_text().as_str(), "1234");

        // Run the blink timer into its off phase
        while engine.blink_phase() == BlinkPhase::On {
            tick(&engine, InputSample::default());
        }
        engine.render_time_edit_hour(&clock);
        assert_eq!(engine.display_snapshot().to_text().as_str(), "  34");
    }

    #[test]
    fn test_zero_hour_setting() {
        let engine = engine_with(EngineSettings {
            zero_hour: true,
            ..EngineSettings::default()
        });
        engine.render_time(&FixedClock(ClockTime::new(0, 7, 0)));
        assert_eq!(engine.display_snapshot().to_text().as_str(), "0007");
    }

    #[test]
    fn test_init_clears_pending_input() {
        let engine = engine_with(EngineSettings::default());
        hold(&engine, buttons(ButtonMask::BTN_1), 150);
        for &(a, b) in &FORWARD {
            tick(&engine, encoder(a, b));
        }

        engine.init(&EngineSettings::default());
        assert_eq!(engine.poll_button_command(), None);
        assert_eq!(engine.poll_encoder(), 0);
    }

    #[test]
    fn test_time_format_change_keeps_pending_input() {
        let engine = engine_with(EngineSettings::default());
        hold(&engine, buttons(ButtonMask::BTN_1), 150);
        for &(a, b) in &FORWARD {
            tick(&engine, encoder(a, b));
        }

        engine.set_time_format(TimeFormat::ZeroHour);
        assert_eq!(engine.time_format(), TimeFormat::ZeroHour);
        engine.render_time(&FixedClock(ClockTime::new(0, 7, 0)));
        assert_eq!(engine.display_snapshot().to_text().as_str(), "0007");

        assert_eq!(engine.poll_button_command(), Some(ButtonCommand::Btn1));
        assert_eq!(engine.poll_encoder(), -1);
    }
}
