//! Settings persistence
//!
//! Loads and saves the engine settings and the radio state in flash.

pub mod radio;
pub mod settings;

pub use radio::{load_radio, save_record, StoredRadio};
pub use settings::{load_settings, save_settings};
