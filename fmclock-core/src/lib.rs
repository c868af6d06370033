//! Board-agnostic core logic for the clock radio firmware
//!
//! This crate contains the real-time display and input engine and
//! everything around it that does not depend on specific hardware:
//!
//! - Segment encoding and the 4-digit display buffer
//! - Display multiplexing with brightness control
//! - Quadrature encoder decoding and button debouncing
//! - Shared countdown timers (mode timeout, blink, secondary)
//! - Display-mode rendering and the display-mode controller
//! - Stored station list
//! - Persisted engine settings and radio records
//!
//! The periodic tick and the foreground code meet only in
//! [`engine::SharedEngine`].

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod engine;
pub mod input;
pub mod stations;
pub mod traits;
pub mod ui;
