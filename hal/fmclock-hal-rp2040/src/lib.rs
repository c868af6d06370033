//! RP2040-specific HAL for the clock radio firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `fmclock-hal` traits:
//!
//! - GPIO wrappers and the display/input line groups
//! - Record storage in flash (implements `fmclock_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod gpio;

// Re-export shared traits from fmclock-hal for convenience
pub use fmclock_hal::{FlashStorage, StorageKey};
