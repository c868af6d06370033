//! Button debouncing and press classification
//!
//! The debouncer is fed the sampled line mask once per tick and classifies
//! steady presses into short presses, long presses and autorepeat steps.
//! Button presses become [`ButtonCommand`]s; when the encoder lines are
//! wired as buttons (raw encoder mode) they become encoder steps instead.

/// Sampled input line mask (bit set = pressed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(pub u8);

impl ButtonMask {
    pub const NONE: Self = Self(0);
    pub const BTN_1: Self = Self(0x01);
    pub const BTN_2: Self = Self(0x02);
    pub const BTN_3: Self = Self(0x04);
    pub const BTN_4: Self = Self(0x08);
    /// Encoder line A in raw mode
    pub const ENC_A: Self = Self(0x10);
    /// Encoder line B in raw mode
    pub const ENC_B: Self = Self(0x20);

    /// Mask of the four front-panel buttons
    pub const BUTTONS: Self = Self(0x0F);

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Button command delivered through the mailbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonCommand {
    Btn1 = 1,
    Btn2 = 2,
    Btn3 = 3,
    Btn4 = 4,
    Btn1Long = 5,
    Btn2Long = 6,
    Btn3Long = 7,
    Btn4Long = 8,
}

impl ButtonCommand {
    /// Mailbox encoding; 0 is reserved for "empty"
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Btn1),
            2 => Some(Self::Btn2),
            3 => Some(Self::Btn3),
            4 => Some(Self::Btn4),
            5 => Some(Self::Btn1Long),
            6 => Some(Self::Btn2Long),
            7 => Some(Self::Btn3Long),
            8 => Some(Self::Btn4Long),
            _ => None,
        }
    }

    /// Short-press command for a single-button mask
    pub fn short_press(mask: ButtonMask) -> Option<Self> {
        match mask {
            ButtonMask::BTN_1 => Some(Self::Btn1),
            ButtonMask::BTN_2 => Some(Self::Btn2),
            ButtonMask::BTN_3 => Some(Self::Btn3),
            ButtonMask::BTN_4 => Some(Self::Btn4),
            _ => None,
        }
    }

    /// Long-press command for a single-button mask
    pub fn long_press(mask: ButtonMask) -> Option<Self> {
        match mask {
            ButtonMask::BTN_1 => Some(Self::Btn1Long),
            ButtonMask::BTN_2 => Some(Self::Btn2Long),
            ButtonMask::BTN_3 => Some(Self::Btn3Long),
            ButtonMask::BTN_4 => Some(Self::Btn4Long),
            _ => None,
        }
    }

    pub fn is_long(&self) -> bool {
        self.to_byte() > Self::Btn4.to_byte()
    }
}

/// Encoder step produced by an encoder line pressed as a button
fn encoder_step(mask: ButtonMask) -> Option<i8> {
    match mask {
        ButtonMask::ENC_A => Some(1),
        ButtonMask::ENC_B => Some(-1),
        _ => None,
    }
}

/// Press classification thresholds, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    /// Presses this short or shorter are contact bounce
    pub short_press: u16,
    /// Hold time at which the long-press command fires
    pub long_press: u16,
    /// Hold time past `long_press` before the first repeat
    pub autorepeat: u16,
}

impl DebounceConfig {
    /// Thresholds for a 3906 Hz tick
    pub const DEFAULT: Self = Self {
        short_press: 100,
        long_press: 1500,
        autorepeat: 300,
    };
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Output of one debouncer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceEvent {
    /// Button command for the mailbox
    Command(ButtonCommand),
    /// Step for the encoder accumulator
    EncoderStep(i8),
}

/// Press-duration state machine
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    config: DebounceConfig,
    previous: ButtonMask,
    counter: u16,
}

impl Debouncer {
    pub const fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            previous: ButtonMask::NONE,
            counter: 0,
        }
    }

    /// Feed one sampled mask
    ///
    /// Combined masks (two buttons at once) are tracked like any other
    /// mask but match no command.
    pub fn update(&mut self, mask: ButtonMask) -> Option<DebounceEvent> {
        if mask.is_empty() {
            return self.release();
        }

        if mask != self.previous {
            // Press edge, no event yet
            self.previous = mask;
            self.counter = 0;
            return None;
        }

        self.counter = self.counter.saturating_add(1);
        let config = &self.config;

        if self.counter == config.long_press {
            ButtonCommand::long_press(mask).map(DebounceEvent::Command)
        } else if self.counter == config.long_press.saturating_add(config.autorepeat) {
            self.counter = config.long_press + 1;
            encoder_step(mask).map(DebounceEvent::EncoderStep)
        } else {
            None
        }
    }

    /// Release keeps `previous`, so pressing the same button again counts
    /// from its first sample
    fn release(&mut self) -> Option<DebounceEvent> {
        let held = self.counter;
        let mask = self.previous;
        self.counter = 0;

        if held <= self.config.short_press || held >= self.config.long_press {
            return None;
        }

        if let Some(step) = encoder_step(mask) {
            return Some(DebounceEvent::EncoderStep(step));
        }
        ButtonCommand::short_press(mask).map(DebounceEvent::Command)
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Press `mask` for the edge tick plus `held` steady ticks, then release
    fn press(debouncer: &mut Debouncer, mask: ButtonMask, held: u16) -> heapless::Vec<DebounceEvent, 64> {
        let mut events = heapless::Vec::new();
        for _ in 0..=held {
            if let Some(event) = debouncer.update(mask) {
                events.push(event).unwrap();
            }
        }
        if let Some(event) = debouncer.update(ButtonMask::NONE) {
            events.push(event).unwrap();
        }
        events
    }

    fn debouncer() -> Debouncer {
        Debouncer::new(DebounceConfig::DEFAULT)
    }

    #[test]
    fn test_command_byte_encoding() {
        for byte in 1..=8 {
            let command = ButtonCommand::from_byte(byte).unwrap();
            assert_eq!(command.to_byte(), byte);
        }
        assert_eq!(ButtonCommand::from_byte(0), None);
        assert_eq!(ButtonCommand::from_byte(9), None);
        assert!(ButtonCommand::Btn2Long.is_long());
        assert!(!ButtonCommand::Btn4.is_long());
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut d = debouncer();
        assert!(press(&mut d, ButtonMask::BTN_1, 100).is_empty());
        assert!(press(&mut d, ButtonMask::BTN_1, 0).is_empty());
    }

    #[test]
    fn test_short_press() {
        let mut d = debouncer();
        let events = press(&mut d, ButtonMask::BTN_2, 101);
        assert_eq!(events.as_slice(), &[DebounceEvent::Command(ButtonCommand::Btn2)]);
    }

    #[test]
    fn test_just_below_long_press_is_short() {
        let mut d = debouncer();
        let events = press(&mut d, ButtonMask::BTN_3, 1499);
        assert_eq!(events.as_slice(), &[DebounceEvent::Command(ButtonCommand::Btn3)]);
    }

    #[test]
    fn test_long_press_fires_once() {
        let mut d = debouncer();
        let events = press(&mut d, ButtonMask::BTN_4, 5000);
        assert_eq!(events.as_slice(), &[DebounceEvent::Command(ButtonCommand::Btn4Long)]);
    }

    #[test]
    fn test_combined_mask_matches_nothing() {
        let mut d = debouncer();
        let both = ButtonMask::BTN_1.union(ButtonMask::BTN_2);
        assert!(press(&mut d, both, 200).is_empty());
        assert!(press(&mut d, both, 2000).is_empty());
    }

    #[test]
    fn test_repress_counts_from_first_sample() {
        let config = DebounceConfig::DEFAULT;
        let mut d = debouncer();
        let samples = config.short_press + 1;

        // A fresh press spends its first sample on the edge
        assert!(press(&mut d, ButtonMask::BTN_1, samples - 1).is_empty());

        // Pressing the same button again counts every sample
        for _ in 0..2 {
            let events = press(&mut d, ButtonMask::BTN_1, samples - 1);
            assert_eq!(events.as_slice(), &[DebounceEvent::Command(ButtonCommand::Btn1)]);
        }

        // Another button starts from its own edge
        assert!(press(&mut d, ButtonMask::BTN_2, samples - 1).is_empty());
    }

    #[test]
    fn test_changed_mask_restarts_count() {
        let mut d = debouncer();
        for _ in 0..150 {
            d.update(ButtonMask::BTN_1);
        }
        // Rolling onto another button restarts from its own edge
        for _ in 0..50 {
            d.update(ButtonMask::BTN_2);
        }
        assert_eq!(d.update(ButtonMask::NONE), None);
    }

    #[test]
    fn test_raw_encoder_short_press_steps() {
        let mut d = debouncer();
        assert_eq!(press(&mut d, ButtonMask::ENC_A, 200).as_slice(), &[DebounceEvent::EncoderStep(1)]);
        assert_eq!(press(&mut d, ButtonMask::ENC_B, 200).as_slice(), &[DebounceEvent::EncoderStep(-1)]);
    }

    #[test]
    fn test_raw_encoder_autorepeat() {
        let config = DebounceConfig::DEFAULT;
        let mut d = debouncer();

        // First repeat at long + autorepeat, then every autorepeat - 1 ticks
        let held = config.long_press + config.autorepeat + 3 * (config.autorepeat - 1);
        let events = press(&mut d, ButtonMask::ENC_B, held);

        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| *e == DebounceEvent::EncoderStep(-1)));
    }

    #[test]
    fn test_autorepeat_does_not_refire_long_press() {
        let config = DebounceConfig::DEFAULT;
        let mut d = debouncer();

        let held = config.long_press + 5 * config.autorepeat;
        let events = press(&mut d, ButtonMask::BTN_1, held);

        let longs = events
            .iter()
            .filter(|e| **e == DebounceEvent::Command(ButtonCommand::Btn1Long))
            .count();
        assert_eq!(longs, 1);
        assert_eq!(events.len(), 1);
    }
}
