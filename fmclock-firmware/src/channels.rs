//! Inter-task communication channels
//!
//! The tick task talks to the foreground only through the shared engine.
//! Everything else goes through the embassy-sync signals here.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Temperature reading signal (updated by the sensor task)
/// Value is temperature in 0.1°C units (e.g., 235 = 23.5°C), or None for sensor fault
pub static TEMP_READING: Signal<CriticalSectionRawMutex, Option<i16>> = Signal::new();
