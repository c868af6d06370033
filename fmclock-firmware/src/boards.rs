//! Board configuration
//!
//! Electrical characteristics and timing of the clock board: a Raspberry Pi
//! Pico carrier with a 4-digit common-anode display driven through PNP digit
//! transistors.
//!
//! | Function                     | GPIO       |
//! |------------------------------|------------|
//! | Segments A..G, P             | 2-9        |
//! | Digits (rightmost first)     | 10-13      |
//! | Buttons 1-4                  | 14-17      |
//! | Encoder A, B                 | 18, 19     |
//!
//! Flash erases and writes run with interrupts masked, so the display tick
//! stops for their duration (tens of milliseconds per sector erase). A write
//! landing between the overflow and compare halves leaves one digit lit at
//! full brightness until it completes. Volume and tuner records are therefore
//! only written once the display is back on the clock.

use embassy_time::Duration;
use fmclock_core::engine::{DrivePolarity, EngineConfig};
use fmclock_core::input::DebounceConfig;

/// One multiplex tick: 256 timer counts of 1 µs
pub const TICK_PERIOD: Duration = Duration::from_micros(256);

/// Engine configuration for this board
pub const ENGINE_CONFIG: EngineConfig = EngineConfig {
    polarity: DrivePolarity::COMMON_ANODE_PNP,
    debounce: DebounceConfig::DEFAULT,
};

/// Foreground refresh interval
pub const UI_REFRESH: Duration = Duration::from_millis(20);

/// Temperature sampling interval
pub const SENSOR_INTERVAL: Duration = Duration::from_secs(1);
